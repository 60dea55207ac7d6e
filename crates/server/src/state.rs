use crate::{auth::credentials::CredentialService, config::Config};
use models::conflict::ConflictRule;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub credentials: Arc<CredentialService>,
    pub conflict_rule: ConflictRule,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            db,
            credentials: Arc::new(CredentialService::new(
                &config.secret_key,
                config.access_token_ttl,
            )),
            conflict_rule: config.conflict_rule,
        }
    }
}
