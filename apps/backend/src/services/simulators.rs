//! Public calculators and the bank directory.

use serde::{Deserialize, Serialize};

use crate::domain::banks::{find_bank, Bank, BANKS};
use crate::domain::credit::{quote, CreditQuote};
use crate::domain::money::{format_cop, parse_cop};
use crate::domain::savings::{savings, SavingsBreakdown};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;

/// A peso amount typed into a form: a number or text like "$ 300.000.000".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PesoInput {
    Number(i64),
    Text(String),
}

impl PesoInput {
    pub fn pesos(&self) -> Result<i64, DomainError> {
        match self {
            PesoInput::Number(v) => Ok(*v),
            PesoInput::Text(raw) => parse_cop(raw).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::Simulation,
                    format!("'{raw}' is not a peso amount"),
                )
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditRequest {
    pub property_value: PesoInput,
    pub term_years: Option<u32>,
    pub annual_rate_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditResponse {
    #[serde(flatten)]
    pub quote: CreditQuote,
    pub monthly_payment_display: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavingsRequest {
    pub property_value: PesoInput,
}

pub fn credit(req: &CreditRequest) -> Result<CreditResponse, AppError> {
    let value = req.property_value.pesos()?;
    let quote = quote(value, req.term_years, req.annual_rate_percent)?;
    Ok(CreditResponse {
        monthly_payment_display: format_cop(quote.monthly_payment),
        quote,
    })
}

pub fn closing_savings(req: &SavingsRequest) -> Result<SavingsBreakdown, AppError> {
    Ok(savings(req.property_value.pesos()?)?)
}

pub fn banks() -> &'static [Bank] {
    BANKS
}

pub fn bank(id: &str) -> Result<&'static Bank, AppError> {
    find_bank(id).ok_or_else(|| {
        AppError::not_found(ErrorCode::BankNotFound, format!("Unknown bank '{id}'"))
    })
}
