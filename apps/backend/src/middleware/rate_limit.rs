//! Rate limit inputs, keyed by client IP.
//!
//! Payment endpoints get a tighter budget than the rest of the API.
//! `/health` is not rate limited.

use std::time::Duration;

use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;

pub const PAYMENTS_PER_MINUTE: u64 = 30;
pub const API_PER_MINUTE: u64 = 100;

pub fn payments_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(Duration::from_secs(60), PAYMENTS_PER_MINUTE).real_ip_key()
}

pub fn api_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(Duration::from_secs(60), API_PER_MINUTE).real_ip_key()
}
