use std::sync::Arc;

use anyhow::{Context, Result};

pub mod auth;
pub mod handlers;
pub mod store;
pub mod tower_middle;

use auth::registry::UserRegistry;
use shared::config::LiveConfig;
use shared::types::server_config::AppConfig;
use store::items::ItemStore;

/// Shared application state, cloned into every connection task.
///
/// Every field is a cheap-clone handle; the registry and the item store are
/// the only pieces of shared mutable/owned data in the process.
#[derive(Clone)]
pub struct AppState {
    pub config: LiveConfig,

    /// HMAC secret used to sign and verify access tokens.  Read once at
    /// startup; SIGHUP config reloads do not touch it (see the
    /// `AuthConfig::jwt_secret` docs).
    pub jwt_secret: Arc<str>,

    /// Fixed credential registry seeded at startup.  Never mutated at
    /// runtime — token verification does not consult it either.
    pub registry: Arc<UserRegistry>,

    /// The one process-wide item collection.
    pub items: Arc<ItemStore>,
}

impl AppState {
    /// Build the full application state from a validated config.
    pub fn new(config: AppConfig) -> Result<Self> {
        let jwt_secret = config
            .auth
            .resolved_jwt_secret()
            .context("jwt_secret must be set via JWT_SECRET or auth.jwt_secret")?;

        let registry = UserRegistry::seeded().context("Failed to seed user registry")?;

        Ok(Self {
            config: LiveConfig::new(config),
            jwt_secret: Arc::from(jwt_secret),
            registry: Arc::new(registry),
            items: Arc::new(ItemStore::seeded()),
        })
    }
}
