use std::convert::Infallible;

use anyhow::Result;
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::info;

use crate::AppState;
use crate::auth::registry::UserRegistry;
use crate::handlers::http::utils::deliver_serialized_json;

use shared::types::TokenClaims;

/// Handle get current user (requires authentication).
///
/// The token subject names the account. A subject the registry no longer
/// knows still gets a 200 with an empty object: a valid signature is the
/// only requirement on this route.
pub async fn handle_get_user(
    _req: Request<IncomingBody>,
    state: AppState,
    claims: TokenClaims,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing get user request for {}", claims.sub);

    let body = user_response_body(&state.registry, &claims.sub);
    deliver_serialized_json(&body, StatusCode::OK)
}

/// Compose the `{"user": ...}` envelope for a token subject.
fn user_response_body(registry: &UserRegistry, subject: &str) -> serde_json::Value {
    match registry.lookup(subject) {
        Some(user) => serde_json::json!({ "user": user.public() }),
        None => serde_json::json!({ "user": {} }),
    }
}
