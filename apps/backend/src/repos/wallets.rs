//! Wallet repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::wallets_sea as wallets_adapter;
pub use crate::adapters::wallets_sea::TransactionCreate;
use crate::entities::transactions::{TransactionStatus, TransactionType};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Wallet domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub balance: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletTransaction {
    pub id: Uuid,
    pub amount: i64,
    pub transaction_type: TransactionType,
    pub transaction_status: TransactionStatus,
    pub description: Option<String>,
    pub property_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The user's wallet, created with a zero balance on first use.
pub async fn ensure_wallet<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Wallet, DomainError> {
    if let Some(wallet) = wallets_adapter::find_by_user(conn, user_id).await? {
        return Ok(Wallet::from(wallet));
    }
    Ok(Wallet::from(
        wallets_adapter::ensure_wallet(conn, user_id).await?,
    ))
}

/// Atomically add `amount` and return the updated wallet.
pub async fn add_to_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wallet_id: Uuid,
    amount: i64,
) -> Result<Wallet, DomainError> {
    if wallets_adapter::add_to_balance(conn, wallet_id, amount).await? == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Wallet,
            "Wallet not found",
        ));
    }
    wallets_adapter::find_by_id(conn, wallet_id)
        .await?
        .map(Wallet::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Wallet, "Wallet not found"))
}

pub async fn record_transaction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TransactionCreate,
) -> Result<WalletTransaction, DomainError> {
    let tx = wallets_adapter::create_transaction(conn, dto).await?;
    Ok(WalletTransaction::from(tx))
}

pub async fn list_transactions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    wallet_id: Uuid,
    limit: u64,
) -> Result<Vec<WalletTransaction>, DomainError> {
    let rows = wallets_adapter::list_transactions(conn, wallet_id, limit).await?;
    Ok(rows.into_iter().map(WalletTransaction::from).collect())
}

impl From<crate::entities::wallets::Model> for Wallet {
    fn from(m: crate::entities::wallets::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            balance: m.balance,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<crate::entities::transactions::Model> for WalletTransaction {
    fn from(m: crate::entities::transactions::Model) -> Self {
        Self {
            id: m.id,
            amount: m.amount,
            transaction_type: m.transaction_type,
            transaction_status: m.transaction_status,
            description: m.description,
            property_id: m.property_id,
            created_at: m.created_at,
        }
    }
}
