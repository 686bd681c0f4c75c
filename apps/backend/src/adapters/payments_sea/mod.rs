//! SeaORM adapter for payments.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::payments::{self, PaymentStatus};

pub mod dto;

pub use dto::{PaymentCreate, PaymentFinalize};

pub async fn create_payment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PaymentCreate,
) -> Result<payments::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    payments::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(dto.user_id),
        property_id: Set(dto.property_id),
        payment_type: Set(dto.payment_type),
        amount: Set(dto.amount),
        currency: Set(dto.currency),
        status: Set(PaymentStatus::Pending),
        bold_reference: Set(dto.order_id),
        bold_transaction_id: Set(None),
        payment_method: Set(None),
        metadata: Set(dto.metadata),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_reference<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: &str,
) -> Result<Option<payments::Model>, sea_orm::DbErr> {
    payments::Entity::find()
        .filter(payments::Column::BoldReference.eq(order_id))
        .one(conn)
        .await
}

/// Finalize a payment only while it is still pending.
///
/// Returns rows affected: 0 means another writer got there first (or the
/// order does not exist).
pub async fn finalize_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    order_id: &str,
    dto: PaymentFinalize,
) -> Result<u64, sea_orm::DbErr> {
    let result = payments::Entity::update_many()
        .col_expr(payments::Column::Status, Expr::value(dto.status))
        .col_expr(
            payments::Column::BoldTransactionId,
            Expr::value(dto.transaction_id),
        )
        .col_expr(payments::Column::PaymentMethod, Expr::value(dto.payment_method))
        .col_expr(
            payments::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(payments::Column::BoldReference.eq(order_id))
        .filter(payments::Column::Status.eq(PaymentStatus::Pending))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
