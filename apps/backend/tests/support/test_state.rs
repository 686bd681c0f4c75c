use habitat_backend::config::db::{DbKind, RuntimeEnv};
use habitat_backend::config::payments::BoldConfig;
use habitat_backend::infra::state::build_state;
use habitat_backend::state::app_state::AppState;
use habitat_backend::state::security_config::SecurityConfig;
use sea_orm::DatabaseConnection;

pub const TEST_JWT_SECRET: &[u8] = b"habitat-integration-test-secret";
pub const TEST_WEBHOOK_SECRET: &str = "whsec-test";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET)
}

/// Fresh, migrated in-memory database with test payment keys.
pub async fn build_test_state() -> AppState {
    build_test_state_with(BoldConfig::for_tests()).await
}

pub async fn build_test_state_with(payments: BoldConfig) -> AppState {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(security())
        .with_payments(payments)
        .build()
        .await
        .expect("build sqlite test state")
}

pub fn db(state: &AppState) -> &DatabaseConnection {
    state.db().expect("test state has a database")
}
