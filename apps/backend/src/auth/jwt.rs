use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::claims::BackendClaims;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

/// Access token lifetime used by `mint_access_token`.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims carried by the auth provider's access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mint a token the way the auth provider does. Used by tests and local tooling.
pub fn mint_access_token(
    sub: Uuid,
    email: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal(ErrorCode::Internal, "Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(ErrorCode::Internal, format!("Failed to encode JWT: {e}")))
}

/// Verify a bearer token and return the caller's identity.
///
/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`; every other failure
/// (bad signature, malformed token, non-uuid subject) to `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<BackendClaims, AppError> {
    let validation = Validation::new(security.algorithm);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })?;

    let sub = Uuid::parse_str(&claims.sub).map_err(|_| AppError::unauthorized_invalid_jwt())?;

    Ok(BackendClaims {
        sub,
        email: claims.email,
        exp: claims.exp,
    })
}
