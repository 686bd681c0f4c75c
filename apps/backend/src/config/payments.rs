//! Payment provider settings.

use std::env;

use crate::entities::payments::PaymentType;
use crate::error::AppError;
use crate::errors::ErrorCode;

pub const DEFAULT_CURRENCY: &str = "COP";
pub const DEFAULT_PUBLICATION_PRICE: i64 = 50_000;
pub const DEFAULT_FEATURED_PRICE: i64 = 100_000;
pub const DEFAULT_FEATURED_DAYS: i64 = 30;
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Checkout and webhook settings for the Bold integration.
#[derive(Clone, Default)]
pub struct BoldConfig {
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    /// When unset, webhook bodies are accepted unsigned.
    pub webhook_secret: Option<String>,
    pub currency: String,
    pub publication_price: i64,
    pub featured_price: i64,
    pub featured_days: i64,
    /// Public origin of the web app; checkout redirects land under it.
    pub app_url: String,
}

// Keys never reach Debug output.
impl std::fmt::Debug for BoldConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoldConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<set>"))
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "<set>"),
            )
            .field("currency", &self.currency)
            .field("publication_price", &self.publication_price)
            .field("featured_price", &self.featured_price)
            .field("featured_days", &self.featured_days)
            .field("app_url", &self.app_url)
            .finish()
    }
}

impl BoldConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            api_key: optional_var("BOLD_API_KEY"),
            secret_key: optional_var("BOLD_SECRET_KEY"),
            webhook_secret: optional_var("BOLD_WEBHOOK_SECRET"),
            currency: optional_var("BOLD_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            publication_price: positive_var("BOLD_PUBLICATION_PRICE", DEFAULT_PUBLICATION_PRICE)?,
            featured_price: positive_var("BOLD_FEATURED_PRICE", DEFAULT_FEATURED_PRICE)?,
            featured_days: positive_var("BOLD_FEATURED_DAYS", DEFAULT_FEATURED_DAYS)?,
            app_url: optional_var("PUBLIC_APP_URL")
                .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Defaults with fixed test keys and no webhook secret.
    pub fn for_tests() -> Self {
        Self {
            api_key: Some("test-api-key".to_string()),
            secret_key: Some("test-secret-key".to_string()),
            webhook_secret: None,
            currency: DEFAULT_CURRENCY.to_string(),
            publication_price: DEFAULT_PUBLICATION_PRICE,
            featured_price: DEFAULT_FEATURED_PRICE,
            featured_days: DEFAULT_FEATURED_DAYS,
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    pub fn price_for(&self, payment_type: PaymentType) -> i64 {
        match payment_type {
            PaymentType::Publication => self.publication_price,
            PaymentType::Featured => self.featured_price,
        }
    }

    pub fn redirect_url(&self) -> String {
        format!("{}/dashboard/payment-result", self.app_url)
    }

    pub fn require_secret_key(&self) -> Result<&str, AppError> {
        self.secret_key.as_deref().ok_or_else(|| {
            AppError::internal(
                ErrorCode::PaymentsNotConfigured,
                "Payment secret key is not configured",
            )
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn positive_var(name: &str, default: i64) -> Result<i64, AppError> {
    match optional_var(name) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(AppError::config(format!(
                "{name} must be a positive integer, got '{raw}'"
            ))),
        },
    }
}
