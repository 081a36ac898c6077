use serde::{Deserialize, Serialize};

/// A registry entry.  Deliberately not `Serialize` — the stored credential
/// hash must never reach the wire.  Handlers serialize [`PublicUser`]
/// instead.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    /// Argon2id hash of the account password.
    pub password_hash: String,
    pub email: String,
}

impl UserRecord {
    /// The wire-safe view of this record.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Identity view returned by `GET /user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub username: String,
    pub email: String,
}
