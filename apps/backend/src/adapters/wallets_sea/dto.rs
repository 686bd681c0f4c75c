//! DTOs for wallets_sea adapter.

use uuid::Uuid;

use crate::entities::transactions::{TransactionStatus, TransactionType};

#[derive(Debug, Clone)]
pub struct TransactionCreate {
    pub user_id: Uuid,
    pub wallet_id: Uuid,
    pub amount: i64,
    pub transaction_type: TransactionType,
    pub transaction_status: TransactionStatus,
    pub description: Option<String>,
    pub property_id: Option<Uuid>,
}
