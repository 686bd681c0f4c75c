use habitat_backend::db::txn::with_txn;
use habitat_backend::repos::profiles;
use habitat_backend::services::wallet::{self, DepositRequest};
use habitat_backend::{AppError, ErrorCode};
use uuid::Uuid;

use crate::support::factory;
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn error_rolls_back_earlier_writes() -> Result<(), AppError> {
    let state = build_test_state().await;

    let user_id = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok::<_, AppError>(factory::user(txn).await.id) })
    })
    .await?;

    let err = with_txn(None, &state, |txn| {
        Box::pin(async move {
            wallet::deposit(txn, user_id, DepositRequest { amount: 50_000 }).await?;
            Err::<(), _>(AppError::bad_request(ErrorCode::BadRequest, "abort"))
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);

    let overview = with_txn(None, &state, |txn| {
        Box::pin(async move { wallet::overview(txn, user_id).await })
    })
    .await?;
    assert_eq!(overview.wallet.balance, 0);
    assert!(overview.transactions.is_empty());
    Ok(())
}

#[tokio::test]
async fn committed_profile_is_visible_to_next_transaction() -> Result<(), AppError> {
    let state = build_test_state().await;

    let user_id = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok::<_, AppError>(factory::user(txn).await.id) })
    })
    .await?;

    let found = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok::<_, AppError>(profiles::find_by_id(txn, user_id).await?) })
    })
    .await?;
    assert_eq!(found.map(|p| p.id), Some(user_id));

    let missing = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok::<_, AppError>(profiles::find_by_id(txn, Uuid::new_v4()).await?) })
    })
    .await?;
    assert!(missing.is_none());
    Ok(())
}
