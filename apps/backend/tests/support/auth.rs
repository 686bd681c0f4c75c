//! Bearer tokens signed with the test secret.

use std::time::{Duration, SystemTime};

use habitat_backend::auth::jwt::mint_access_token;
use uuid::Uuid;

use super::test_state::security;

pub fn mint_test_token(sub: Uuid, email: &str) -> String {
    mint_access_token(sub, email, SystemTime::now(), &security()).expect("mint token")
}

/// `Authorization` header value for the given identity.
pub fn bearer_header(sub: Uuid, email: &str) -> String {
    format!("Bearer {}", mint_test_token(sub, email))
}

pub fn mint_expired_token(sub: Uuid, email: &str) -> String {
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(2 * 60 * 60))
        .unwrap();
    mint_access_token(sub, email, past, &security()).expect("mint expired token")
}
