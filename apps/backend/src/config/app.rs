//! Centralized application configuration loaded from environment variables.

use std::env;

use crate::config::db::{must_var, DbKind, RuntimeEnv};
use crate::config::payments::BoldConfig;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Database configuration
    pub runtime_env: RuntimeEnv,
    pub db_kind: DbKind,

    // Security configuration
    pub jwt_secret: String,

    pub payments: BoldConfig,

    // HTTP payload limit
    pub max_json_payload_size: usize,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let db_kind = match env::var("HABITAT_DB_KIND") {
            Ok(raw) => raw.parse::<DbKind>()?,
            Err(_) => DbKind::Postgres,
        };

        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;
        if jwt_secret.len() < 16 {
            return Err(AppError::config(
                "BACKEND_JWT_SECRET must be at least 16 bytes",
            ));
        }

        let max_json_payload_size = match env::var("MAX_JSON_PAYLOAD_SIZE") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                AppError::config(format!(
                    "MAX_JSON_PAYLOAD_SIZE must be a byte count, got '{raw}'"
                ))
            })?,
            Err(_) => 256 * 1024,
        };

        Ok(Self {
            host,
            port,
            runtime_env: RuntimeEnv::Prod,
            db_kind,
            jwt_secret,
            payments: BoldConfig::from_env()?,
            max_json_payload_size,
        })
    }
}
