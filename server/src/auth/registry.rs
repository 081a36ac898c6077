use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{error, warn};

use crate::auth::password::{hash_password, verify_password};
use shared::types::login::LoginError;
use shared::types::user::UserRecord;

/// Fixed in-memory credential registry.
///
/// Accounts are seeded once at startup and never change — there is no
/// registration route, and token verification does not consult the registry
/// either.  Lookups are by username.
#[derive(Debug)]
pub struct UserRegistry {
    users: HashMap<String, UserRecord>,
}

impl UserRegistry {
    /// Build the registry with the fixed development account.
    ///
    /// The seed password is stored as an Argon2id hash; accept/reject
    /// behavior is identical to comparing the plaintext.
    pub fn seeded() -> Result<Self> {
        let mut users = HashMap::new();

        let record = UserRecord {
            username: "testuser".to_string(),
            password_hash: hash_password("password123")
                .context("Failed to hash seed password")?,
            email: "testuser@example.com".to_string(),
        };
        users.insert(record.username.clone(), record);

        Ok(Self { users })
    }

    /// Check a credential pair.  Unknown usernames and wrong passwords get
    /// the same answer, so the response never reveals which half was wrong.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<&UserRecord, LoginError> {
        let user = self
            .users
            .get(username)
            .ok_or(LoginError::InvalidCredentials)?;

        let valid = verify_password(&user.password_hash, password).map_err(|e| {
            error!("Password verification error for {}: {}", username, e);
            LoginError::InvalidCredentials
        })?;

        if !valid {
            warn!("Invalid password for user: {}", username);
            return Err(LoginError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Identity lookup for `GET /user`.  `None` means the subject has no
    /// registry entry; the caller serializes an empty record.
    pub fn lookup(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
