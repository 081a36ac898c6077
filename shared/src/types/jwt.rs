use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Claims embedded in every access token issued by the server.
///
/// Verification is stateless: the HMAC signature and the expiry are all that
/// is checked — **zero registry reads**.  A token therefore stays valid for
/// its full lifetime even if the subject has since disappeared from the
/// user registry.  There is no revocation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Standard JWT subject — set to the username.
    pub sub: String,

    /// Unique token id (UUID v4).  Every issued token is distinct even when
    /// two logins land in the same second.
    pub jti: String,

    /// Standard JWT expiry (Unix timestamp, seconds).
    pub exp: usize,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: usize,
}

// ---------------------------------------------------------------------------
// Token rejection reasons
// ---------------------------------------------------------------------------

/// Why a bearer token was rejected.
///
/// The variant drives the HTTP status: requests carrying no usable token at
/// all (absent header, expired token) map to 401; a token that is present
/// but cannot be accepted (garbage structure, bad signature) maps to 422.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization: Bearer <token>` header on the request.
    MissingToken,
    /// The token is not a structurally valid JWT.
    MalformedToken,
    /// Well-formed token whose signature does not verify.
    InvalidSignature,
    /// Signature verifies, but the expiry has passed.
    Expired,
}

impl AuthError {
    pub fn to_message(&self) -> &'static str {
        match self {
            Self::MissingToken => "Missing Authorization Header",
            Self::MalformedToken => "Invalid token",
            Self::InvalidSignature => "Signature verification failed",
            Self::Expired => "Token has expired",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::Expired => StatusCode::UNAUTHORIZED,
            Self::MalformedToken | Self::InvalidSignature => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}
