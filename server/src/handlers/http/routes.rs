use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, combinators::BoxBody};
use hyper::{Method, Request, Response, StatusCode};
use tracing::warn;

use crate::AppState;
use crate::auth::bearer_claims;
use crate::handlers::http::{auth, items, users, utils::*};

use shared::types::{AuthError, ItemError, TokenClaims};

// ---------------------------------------------------------------------------
// Handler type aliases
// ---------------------------------------------------------------------------
//
// Two security tiers:
//
//   RouteHandler — no auth.  Receives (req, state).
//                  Use for: /login, /health.
//
//   AuthHandler  — bearer token signature + expiry, zero registry reads.
//                  Receives (req, state, claims).
//                  Use for: everything behind the token wall.

type RouteHandler = Box<
    dyn Fn(
            Request<hyper::body::Incoming>,
            AppState,
        )
            -> Pin<Box<dyn Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send>>
        + Send
        + Sync,
>;

type AuthHandler = Box<
    dyn Fn(
            Request<hyper::body::Incoming>,
            AppState,
            TokenClaims,
        )
            -> Pin<Box<dyn Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send>>
        + Send
        + Sync,
>;

// ---------------------------------------------------------------------------
// RouteKind
// ---------------------------------------------------------------------------

enum RouteKind {
    /// No authentication check.
    Open(RouteHandler),

    /// Bearer auth: token signature + expiry only, zero registry reads.
    /// Handler receives the decoded `TokenClaims`.
    Bearer(AuthHandler),
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

struct Route {
    method: Method,
    path: String,
    kind: RouteKind,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub struct Router {
    routes: Vec<Route>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes_count", &self.routes.len())
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    // ── Open (no auth) ────────────────────────────────────────────────────────

    /// GET with no authentication — use for health checks.
    pub fn get<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::GET,
            path: path.to_string(),
            kind: RouteKind::Open(Box::new(move |req, state| Box::pin(handler(req, state)))),
        });
        self
    }

    /// POST with no authentication — use only for login.
    pub fn post<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::POST,
            path: path.to_string(),
            kind: RouteKind::Open(Box::new(move |req, state| Box::pin(handler(req, state)))),
        });
        self
    }

    // ── Bearer auth (token signature + expiry, zero registry reads) ──────────
    //
    // The router decodes and verifies the token before the handler is called.
    // Handlers receive `TokenClaims` and must NOT call `bearer_claims`
    // themselves — the work is already done.

    /// GET guarded by bearer auth.
    pub fn get_auth<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState, TokenClaims) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::GET,
            path: path.to_string(),
            kind: RouteKind::Bearer(Box::new(move |req, state, claims| {
                Box::pin(handler(req, state, claims))
            })),
        });
        self
    }

    /// POST guarded by bearer auth.
    pub fn post_auth<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState, TokenClaims) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::POST,
            path: path.to_string(),
            kind: RouteKind::Bearer(Box::new(move |req, state, claims| {
                Box::pin(handler(req, state, claims))
            })),
        });
        self
    }

    /// PUT guarded by bearer auth.
    pub fn put_auth<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState, TokenClaims) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::PUT,
            path: path.to_string(),
            kind: RouteKind::Bearer(Box::new(move |req, state, claims| {
                Box::pin(handler(req, state, claims))
            })),
        });
        self
    }

    /// DELETE guarded by bearer auth.
    pub fn delete_auth<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState, TokenClaims) -> Fut
            + Send
            + Sync
            + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::DELETE,
            path: path.to_string(),
            kind: RouteKind::Bearer(Box::new(move |req, state, claims| {
                Box::pin(handler(req, state, claims))
            })),
        });
        self
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
        state: AppState,
    ) -> Result<Response<BoxBody<Bytes, Infallible>>> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        for route in &self.routes {
            if route.method != method || !Self::path_matches(&route.path, &path) {
                continue;
            }

            return match &route.kind {
                // ── Open ──────────────────────────────────────────────────────
                RouteKind::Open(h) => h(req, state).await,

                // ── Bearer: token decode only, no registry ────────────────────
                RouteKind::Bearer(h) => match bearer_claims(&req, &state.jwt_secret) {
                    Ok(claims) => h(req, state, claims).await,
                    Err(err) => {
                        warn!("Auth rejected {} {}: {}", method, path, err.to_message());
                        auth_rejection(err)
                    }
                },
            };
        }

        // No registered route matched.
        deliver_msg_json("Endpoint not found", StatusCode::NOT_FOUND)
            .context("Failed to deliver 404 response")
    }

    // ── Path matching ─────────────────────────────────────────────────────────

    pub fn path_matches(route_path: &str, request_path: &str) -> bool {
        // Strip query string from incoming request path before comparing.
        let clean = request_path.split('?').next().unwrap_or(request_path);

        // Exact match.
        if route_path == clean {
            return true;
        }

        // Segment-by-segment matching for `:param` wildcards.
        // e.g.  "/items/:id"  matches  "/items/42"
        let route_segs: Vec<&str> = route_path.split('/').collect();
        let path_segs: Vec<&str> = clean.split('/').collect();

        if route_segs.len() != path_segs.len() {
            return false;
        }

        route_segs
            .iter()
            .zip(path_segs.iter())
            .all(|(r, p)| r.starts_with(':') || r == p)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_rejection(err: AuthError) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_msg_json(err.to_message(), err.status())
        .context("Failed to deliver auth rejection")
}

/// 400 for a structurally matched item path whose id segment is not numeric.
fn invalid_id_rejection() -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_msg_json(
        ItemError::InvalidId.to_message(),
        ItemError::InvalidId.status(),
    )
    .context("Failed to deliver bad-id rejection")
}

// ---------------------------------------------------------------------------
// API router
//
// Auth tier is enforced here at the routing level — handlers MUST NOT repeat
// the verification.  The contract is:
//
//   .get(...)          → Open   — handler gets (req, state)
//   .post(...)         → Open   — login only
//   .get_auth(...)     → Bearer — handler gets (req, state, claims)
//   .post_auth(...)    → Bearer — same
//   .put_auth(...)     → Bearer — same
//   .delete_auth(...)  → Bearer — same
// ---------------------------------------------------------------------------

pub fn build_api_router() -> Router {
    Router::new()
        // ── Public: no auth ──────────────────────────────────────────────────
        //
        // These are the only routes where auth is intentionally absent.
        .post("/login", |req, state| async move {
            auth::handle_login(req, state).await.context("Login failed")
        })
        .get("/health", |_req, _state| async move {
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "application/json")
                .body(http_body_util::Full::new(Bytes::from(r#"{"status":"ok"}"#)).boxed())
                .unwrap())
        })
        // ── Bearer auth: token decode only, zero registry reads ──────────────
        //
        // The token is cryptographically verified (signature + expiry) by the
        // router; handlers receive the decoded claims and never re-check.
        .get_auth("/user", |req, state, claims| async move {
            users::handle_get_user(req, state, claims)
                .await
                .context("User get failed")
        })
        .get_auth("/items", |req, state, _claims| async move {
            items::handle_list_items(req, state)
                .await
                .context("Item list failed")
        })
        .get_auth("/items/:id", |req, state, _claims| async move {
            match items::extract_item_id(req.uri().path()) {
                Some(id) => items::handle_get_item(req, state, id)
                    .await
                    .context("Item get failed"),
                None => invalid_id_rejection(),
            }
        })
        .post_auth("/items", |req, state, _claims| async move {
            items::handle_create_item(req, state)
                .await
                .context("Item create failed")
        })
        .put_auth("/items/:id", |req, state, _claims| async move {
            match items::extract_item_id(req.uri().path()) {
                Some(id) => items::handle_update_item(req, state, id)
                    .await
                    .context("Item update failed"),
                None => invalid_id_rejection(),
            }
        })
        .delete_auth("/items/:id", |req, state, _claims| async move {
            match items::extract_item_id(req.uri().path()) {
                Some(id) => items::handle_delete_item(req, state, id)
                    .await
                    .context("Item delete failed"),
                None => invalid_id_rejection(),
            }
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
