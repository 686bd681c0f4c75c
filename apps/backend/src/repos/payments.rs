//! Payment repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::payments_sea as payments_adapter;
pub use crate::adapters::payments_sea::{PaymentCreate, PaymentFinalize};
use crate::entities::payments::{PaymentStatus, PaymentType};
use crate::errors::domain::DomainError;

/// Payment domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Option<Uuid>,
    pub payment_type: PaymentType,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub order_id: String,
    pub transaction_id: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn create_payment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PaymentCreate,
) -> Result<Payment, DomainError> {
    let payment = payments_adapter::create_payment(conn, dto).await?;
    Ok(Payment::from(payment))
}

pub async fn find_by_order_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: &str,
) -> Result<Option<Payment>, DomainError> {
    let payment = payments_adapter::find_by_reference(conn, order_id).await?;
    Ok(payment.map(Payment::from))
}

/// Write the provider outcome if the payment is still pending.
/// `false` means some other writer finalized it first.
pub async fn finalize_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: &str,
    dto: PaymentFinalize,
) -> Result<bool, DomainError> {
    Ok(payments_adapter::finalize_pending(conn, order_id, dto).await? > 0)
}

impl From<crate::entities::payments::Model> for Payment {
    fn from(m: crate::entities::payments::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            property_id: m.property_id,
            payment_type: m.payment_type,
            amount: m.amount,
            currency: m.currency,
            status: m.status,
            order_id: m.bold_reference,
            transaction_id: m.bold_transaction_id,
            payment_method: m.payment_method,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
