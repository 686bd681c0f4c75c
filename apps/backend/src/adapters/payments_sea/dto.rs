//! DTOs for payments_sea adapter.

use uuid::Uuid;

use crate::entities::payments::{PaymentStatus, PaymentType};

#[derive(Debug, Clone)]
pub struct PaymentCreate {
    pub user_id: Uuid,
    pub property_id: Option<Uuid>,
    pub payment_type: PaymentType,
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub metadata: Option<serde_json::Value>,
}

/// Provider outcome written onto a pending payment.
#[derive(Debug, Clone)]
pub struct PaymentFinalize {
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
}
