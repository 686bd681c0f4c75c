use std::collections::HashMap;

use serde::Serialize;

use crate::entities::payments::PaymentStatus;

/// Transaction status as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Approved,
    Rejected,
    /// Still in flight (`pending`, `processing`)
    Pending,
    /// `failed`, `cancelled`, `voided` and anything unrecognised
    Cancelled,
}

impl ProviderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" => ProviderStatus::Approved,
            "rejected" => ProviderStatus::Rejected,
            "pending" | "processing" => ProviderStatus::Pending,
            _ => ProviderStatus::Cancelled,
        }
    }

    /// Stored status this result finalizes to; `None` while pending.
    pub fn terminal_status(self) -> Option<PaymentStatus> {
        match self {
            ProviderStatus::Approved => Some(PaymentStatus::Approved),
            ProviderStatus::Rejected => Some(PaymentStatus::Rejected),
            ProviderStatus::Pending => None,
            ProviderStatus::Cancelled => Some(PaymentStatus::Cancelled),
        }
    }
}

/// What the payment-result page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectState {
    Approved,
    Rejected,
    Pending,
    Error,
}

impl From<PaymentStatus> for RedirectState {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Approved => RedirectState::Approved,
            PaymentStatus::Rejected => RedirectState::Rejected,
            PaymentStatus::Pending => RedirectState::Pending,
            PaymentStatus::Cancelled => RedirectState::Error,
        }
    }
}

/// Query parameters the provider appends when redirecting the buyer back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectResult {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
}

impl RedirectResult {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            query
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            order_id: get("bold-order-id").or_else(|| get("order-id")),
            status: get("bold-tx-status").or_else(|| get("status")),
            transaction_id: get("bold-tx-id"),
            payment_method: get("bold-payment-method"),
        }
    }
}
