//! SeaORM adapter for wallets and their transactions.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::{transactions, wallets};

pub mod dto;

pub use dto::TransactionCreate;

pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<wallets::Model>, sea_orm::DbErr> {
    wallets::Entity::find()
        .filter(wallets::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Insert an empty wallet unless the user already has one.
pub async fn ensure_wallet<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<wallets::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    wallets::Entity::insert(wallets::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        balance: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::column(wallets::Column::UserId)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;

    find_by_user(conn, user_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Wallet not found".to_string()))
}

/// `balance = balance + amount`; returns rows affected.
pub async fn add_to_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wallet_id: Uuid,
    amount: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = wallets::Entity::update_many()
        .col_expr(
            wallets::Column::Balance,
            Expr::col(wallets::Column::Balance).add(amount),
        )
        .col_expr(
            wallets::Column::UpdatedAt,
            Expr::value(OffsetDateTime::now_utc()),
        )
        .filter(wallets::Column::Id.eq(wallet_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wallet_id: Uuid,
) -> Result<Option<wallets::Model>, sea_orm::DbErr> {
    wallets::Entity::find_by_id(wallet_id).one(conn).await
}

pub async fn create_transaction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TransactionCreate,
) -> Result<transactions::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(dto.user_id),
        wallet_id: Set(dto.wallet_id),
        amount: Set(dto.amount),
        transaction_type: Set(dto.transaction_type),
        transaction_status: Set(dto.transaction_status),
        description: Set(dto.description),
        property_id: Set(dto.property_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn list_transactions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wallet_id: Uuid,
    limit: u64,
) -> Result<Vec<transactions::Model>, sea_orm::DbErr> {
    transactions::Entity::find()
        .filter(transactions::Column::WalletId.eq(wallet_id))
        .order_by_desc(transactions::Column::CreatedAt)
        .order_by_desc(transactions::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}
