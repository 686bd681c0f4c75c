use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::payments::BoldConfig;

/// Shared resources handed to every handler through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Absent when the state is built without a database (config tests)
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub payments: BoldConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, payments: BoldConfig) -> Self {
        Self {
            db: Some(db),
            security,
            payments,
        }
    }

    pub fn new_without_db(security: SecurityConfig, payments: BoldConfig) -> Self {
        Self {
            db: None,
            security,
            payments,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
