//! Claims placed into request extensions by the authentication middleware.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verified identity of the caller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    /// Auth provider subject; also the profile id
    pub sub: Uuid,
    pub email: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
