pub mod jwt;
pub mod password;
pub mod registry;

// Re-export the token entry points
pub use jwt::{bearer_claims, decode_token, issue_token};
