//! Leasing/mortgage quote with French amortization (constant installments).

use serde::Serialize;

use crate::errors::domain::{DomainError, ValidationKind};

pub const DEFAULT_TERM_YEARS: u32 = 15;
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 12.0;
pub const MAX_TERM_YEARS: u32 = 30;
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditQuote {
    /// Whole pesos, rounded
    pub monthly_payment: i64,
    pub months: u32,
    pub total_paid: i64,
    pub total_interest: i64,
}

/// Monthly installment for `principal` over `years` at `annual_rate_percent`.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let n = f64::from(years * 12);
    let r = annual_rate_percent / 100.0 / 12.0;
    if r == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

pub fn quote(
    property_value: i64,
    term_years: Option<u32>,
    annual_rate_percent: Option<f64>,
) -> Result<CreditQuote, DomainError> {
    let years = term_years.unwrap_or(DEFAULT_TERM_YEARS);
    let rate = annual_rate_percent.unwrap_or(DEFAULT_ANNUAL_RATE_PERCENT);

    if property_value <= 0 {
        return Err(invalid("property_value must be greater than zero"));
    }
    if years == 0 {
        return Err(invalid("term_years must be greater than zero"));
    }
    if years > MAX_TERM_YEARS {
        return Err(invalid(format!(
            "term_years must be at most {MAX_TERM_YEARS}"
        )));
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err(invalid("annual_rate_percent must be zero or positive"));
    }
    if rate > MAX_ANNUAL_RATE_PERCENT {
        return Err(invalid(format!(
            "annual_rate_percent must be at most {MAX_ANNUAL_RATE_PERCENT}"
        )));
    }

    let months = years * 12;
    let payment = monthly_payment(property_value as f64, rate, years);
    let total = payment * f64::from(months);
    // `as i64` saturates silently
    if !total.is_finite() || total >= i64::MAX as f64 {
        return Err(invalid("property_value is too large to quote"));
    }
    let monthly_payment = payment.round() as i64;
    let total_paid = total.round() as i64;

    Ok(CreditQuote {
        monthly_payment,
        months,
        total_paid,
        total_interest: total_paid - property_value,
    })
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::Simulation, detail)
}
