use hyper::header::HeaderMap;
use tracing::{debug, warn};

/// Extract a header value as a string
pub fn get_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(|s| {
        debug!("Retrieved header: {}", name);
        s.to_string()
    })
}

/// Extract bearer token from Authorization header
/// Format: "Authorization: Bearer <token>"
pub fn get_bearer_token(headers: &HeaderMap) -> Option<String> {
    get_header_value(headers, "authorization").and_then(|auth| {
        if auth.starts_with("Bearer ") {
            debug!("Bearer token extracted");
            Some(auth[7..].to_string())
        } else {
            warn!("Authorization header present but not Bearer");
            None
        }
    })
}
