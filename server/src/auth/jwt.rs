use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use hyper::Request;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use crate::handlers::http::utils::headers::get_bearer_token;
use shared::types::jwt::{AuthError, TokenClaims};

/// Get current Unix timestamp in seconds
pub fn get_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Issue a signed access token for `username`, valid for `expiry_minutes`
/// from now.
pub fn issue_token(username: &str, secret: &str, expiry_minutes: u64) -> Result<String> {
    let iat = get_timestamp();
    let exp = iat + (expiry_minutes * 60) as i64;

    let claims = TokenClaims {
        sub: username.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp: exp as usize,
        iat: iat as usize,
    };

    encode_claims(&claims, secret)
}

/// Sign a claim set with HS256.
pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to sign access token")
}

/// Decode and verify a raw token string.
///
/// Zero leeway: a token is valid strictly before its `exp`; the expiry
/// instant itself is already rejected. The `AuthError` mapping decides the
/// response status (401 vs 422) — see `AuthError::status`.
pub fn decode_token(token: &str, secret: &str) -> std::result::Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::MalformedToken,
    })?;

    // jsonwebtoken only rejects a strictly-past `exp`; the expiry instant
    // itself must not verify.
    if claims.exp as i64 <= get_timestamp() {
        return Err(AuthError::Expired);
    }

    Ok(claims)
}

/// Extract the bearer token from the request and verify it.
///
/// The router calls this before any protected handler runs; handlers
/// receive the decoded claims and never re-verify.
pub fn bearer_claims(
    req: &Request<hyper::body::Incoming>,
    secret: &str,
) -> std::result::Result<TokenClaims, AuthError> {
    let token = get_bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;
    debug!(
        "Verifying bearer token for {} {}",
        req.method(),
        req.uri().path()
    );
    decode_token(&token, secret)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-0123456789-0123456789-0123456789";

    #[test]
    fn issued_token_verifies_back_to_subject() {
        let token = issue_token("testuser", SECRET, 60).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "testuser");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn every_token_gets_a_fresh_jti() {
        let t1 = issue_token("testuser", SECRET, 60).unwrap();
        let t2 = issue_token("testuser", SECRET, 60).unwrap();
        let c1 = decode_token(&t1, SECRET).unwrap();
        let c2 = decode_token(&t2, SECRET).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let iat = get_timestamp() - 7200;
        let claims = TokenClaims {
            sub: "testuser".to_string(),
            jti: "expired-test".to_string(),
            exp: (iat + 3600) as usize,
            iat: iat as usize,
        };
        let token = encode_claims(&claims, SECRET).unwrap();
        assert_eq!(
            decode_token(&token, SECRET).unwrap_err(),
            AuthError::Expired
        );
    }

    #[test]
    fn token_expiring_this_instant_is_rejected_as_expired() {
        let now = get_timestamp();
        let claims = TokenClaims {
            sub: "testuser".to_string(),
            jti: "boundary-test".to_string(),
            exp: now as usize,
            iat: (now - 3600) as usize,
        };
        let token = encode_claims(&claims, SECRET).unwrap();
        assert_eq!(
            decode_token(&token, SECRET).unwrap_err(),
            AuthError::Expired
        );
    }

    #[test]
    fn unexpired_token_with_same_shape_verifies() {
        let iat = get_timestamp();
        let claims = TokenClaims {
            sub: "testuser".to_string(),
            jti: "valid-test".to_string(),
            exp: (iat + 3600) as usize,
            iat: iat as usize,
        };
        let token = encode_claims(&claims, SECRET).unwrap();
        assert!(decode_token(&token, SECRET).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected_as_bad_signature() {
        let token = issue_token("testuser", SECRET, 60).unwrap();
        let err = decode_token(&token, "another-secret-0123456789-0123456789").unwrap_err();
        assert_eq!(err, AuthError::InvalidSignature);
    }

    #[test]
    fn garbage_token_is_rejected_as_malformed() {
        assert_eq!(
            decode_token("INVALID_TOKEN", SECRET).unwrap_err(),
            AuthError::MalformedToken
        );
    }

    #[test]
    fn two_segment_token_is_rejected_as_malformed() {
        assert_eq!(
            decode_token("abc.def", SECRET).unwrap_err(),
            AuthError::MalformedToken
        );
    }
}
