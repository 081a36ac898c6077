use std::convert::Infallible;

use anyhow::Result;
use bytes::Bytes;
use http_body_util::BodyExt;
use http_body_util::combinators::BoxBody;
use hyper::{Request, Response, StatusCode};
use tracing::{info, warn};

use crate::AppState;
use crate::auth::issue_token;
use crate::handlers::http::utils::{deliver_msg_json, deliver_serialized_json};

use shared::types::{LoginData, LoginError, TokenResponse};

/// Main login handler.
///
/// Credentials come in as JSON; a match returns a fresh signed access token.
/// Unknown usernames and wrong passwords produce the same 401 body so the
/// response does not reveal which half was wrong.
pub async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing login request");

    // Parse credentials
    let login_data = match parse_login_body(req).await {
        Ok(data) => data,
        Err(login_error) => {
            warn!("Login parsing failed: {}", login_error.to_message());
            return deliver_msg_json(login_error.to_message(), login_error.status());
        }
    };

    // Attempt login
    match state
        .registry
        .authenticate(&login_data.username, &login_data.password)
    {
        Ok(user) => {
            info!("User logged in successfully: {}", user.username);

            let expiry_minutes = state.config.read().await.auth.token_expiry_minutes;
            let access_token = issue_token(&user.username, &state.jwt_secret, expiry_minutes)?;

            deliver_serialized_json(&TokenResponse { access_token }, StatusCode::OK)
        }
        Err(login_error) => {
            warn!(
                "Login failed for {}: {}",
                login_data.username,
                login_error.to_message()
            );
            deliver_msg_json(login_error.to_message(), login_error.status())
        }
    }
}

/// Read the request body and decode the credential JSON.
async fn parse_login_body(
    req: Request<hyper::body::Incoming>,
) -> std::result::Result<LoginData, LoginError> {
    let body = req
        .collect()
        .await
        .map_err(|_| LoginError::InvalidBody)?
        .to_bytes();

    serde_json::from_slice(&body).map_err(|_| LoginError::InvalidBody)
}
