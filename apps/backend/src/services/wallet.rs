use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::entities::transactions::{TransactionStatus, TransactionType};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::wallets::{self, TransactionCreate, Wallet, WalletTransaction};

pub const MAX_DEPOSIT: i64 = 1_000_000_000;
pub const TRANSACTION_HISTORY: u64 = 100;
const DEPOSIT_DESCRIPTION: &str = "Depósito de fondos";

#[derive(Debug, Clone, Serialize)]
pub struct WalletOverview {
    pub wallet: Wallet,
    pub transactions: Vec<WalletTransaction>,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositReceipt {
    pub balance: i64,
    pub transaction: WalletTransaction,
}

pub fn validate_deposit(amount: i64) -> Result<i64, DomainError> {
    if amount <= 0 {
        return Err(DomainError::validation(
            ValidationKind::Deposit,
            "amount must be greater than zero",
        ));
    }
    if amount > MAX_DEPOSIT {
        return Err(DomainError::validation(
            ValidationKind::Deposit,
            format!("amount must be at most {MAX_DEPOSIT}"),
        ));
    }
    Ok(amount)
}

pub async fn overview<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<WalletOverview, AppError> {
    let wallet = wallets::ensure_wallet(conn, user_id).await?;
    let transactions = wallets::list_transactions(conn, wallet.id, TRANSACTION_HISTORY).await?;
    Ok(WalletOverview {
        wallet,
        transactions,
    })
}

/// Credit the wallet and record the deposit; both or neither.
pub async fn deposit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    req: DepositRequest,
) -> Result<DepositReceipt, AppError> {
    let amount = validate_deposit(req.amount)?;
    let wallet = wallets::ensure_wallet(conn, user_id).await?;
    let wallet = wallets::add_to_balance(conn, wallet.id, amount).await?;
    let transaction = wallets::record_transaction(
        conn,
        TransactionCreate {
            user_id,
            wallet_id: wallet.id,
            amount,
            transaction_type: TransactionType::Deposit,
            transaction_status: TransactionStatus::Completed,
            description: Some(DEPOSIT_DESCRIPTION.to_string()),
            property_id: None,
        },
    )
    .await?;
    info!(
        user_id = %user_id,
        wallet_id = %wallet.id,
        amount,
        balance = wallet.balance,
        "Wallet deposit"
    );
    Ok(DepositReceipt {
        balance: wallet.balance,
        transaction,
    })
}
