use habitat_backend::config::payments::BoldConfig;
use habitat_backend::db::txn::with_txn;
use habitat_backend::entities::payments::PaymentStatus;
use habitat_backend::entities::properties::PublicationStatus;
use habitat_backend::repos::{payments, properties};
use habitat_backend::services::payments::{
    apply_provider_result, create_checkout, ProviderResult, SignatureRequest,
};
use habitat_backend::services::properties as listing_service;
use habitat_backend::{AppError, ErrorCode};
use serde_json::json;
use uuid::Uuid;

use crate::support::factory;
use crate::support::test_state::build_test_state;

fn publication_request(property_id: Uuid, cfg: &BoldConfig) -> SignatureRequest {
    SignatureRequest {
        order_id: None,
        amount: Some(cfg.publication_price),
        currency: Some("cop".to_string()),
        payment_type: None,
        property_id: Some(property_id),
    }
}

fn report(order_id: &str, status: &str) -> ProviderResult {
    ProviderResult::new(Some(order_id.to_string()), Some(status.to_string()), None, None)
        .expect("valid report")
}

#[tokio::test]
async fn first_terminal_report_wins() -> Result<(), AppError> {
    let state = build_test_state().await;
    let cfg = BoldConfig::for_tests();

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let owner = factory::user(txn).await;
            let listing = factory::listing(txn, owner.id, json!({})).await;
            let property_id = listing.listing.card.id;

            let checkout =
                create_checkout(txn, &cfg, owner.id, publication_request(property_id, &cfg))
                    .await?;
            assert_eq!(checkout.checkout.currency, "COP");

            let pending = apply_provider_result(txn, &cfg, report(&checkout.order_id, "pending"))
                .await?;
            assert_eq!(pending.status, PaymentStatus::Pending);

            let rejected =
                apply_provider_result(txn, &cfg, report(&checkout.order_id, "rejected")).await?;
            assert_eq!(rejected.status, PaymentStatus::Rejected);

            // Approval after rejection does not publish.
            let err = apply_provider_result(txn, &cfg, report(&checkout.order_id, "approved"))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::PaymentAlreadyFinalized);

            let stored = properties::find_by_id(txn, property_id).await?.expect("listing");
            assert_eq!(stored.publication_status, PublicationStatus::PendingPayment);
            assert!(stored.paid_at.is_none());
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn approval_side_effects_run_once() -> Result<(), AppError> {
    let state = build_test_state().await;
    let cfg = BoldConfig::for_tests();

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let owner = factory::user(txn).await;
            let listing = factory::listing(txn, owner.id, json!({})).await;
            let property_id = listing.listing.card.id;
            let checkout =
                create_checkout(txn, &cfg, owner.id, publication_request(property_id, &cfg))
                    .await?;

            apply_provider_result(txn, &cfg, report(&checkout.order_id, "approved")).await?;
            let first = properties::find_by_id(txn, property_id).await?.expect("listing");
            assert_eq!(first.publication_status, PublicationStatus::Published);
            let paid_at = first.paid_at.expect("paid_at set");

            let again =
                apply_provider_result(txn, &cfg, report(&checkout.order_id, "APPROVED")).await?;
            assert_eq!(again.status, PaymentStatus::Approved);
            let second = properties::find_by_id(txn, property_id).await?.expect("listing");
            assert_eq!(second.paid_at, Some(paid_at));
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn approval_leaves_rejected_listing_alone() -> Result<(), AppError> {
    let state = build_test_state().await;
    let cfg = BoldConfig::for_tests();

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let owner = factory::user(txn).await;
            let admin = factory::admin(txn).await;
            let listing = factory::listing(txn, owner.id, json!({})).await;
            let property_id = listing.listing.card.id;
            let checkout =
                create_checkout(txn, &cfg, owner.id, publication_request(property_id, &cfg))
                    .await?;

            listing_service::moderate(txn, &admin, property_id, PublicationStatus::Rejected)
                .await?;

            let approved =
                apply_provider_result(txn, &cfg, report(&checkout.order_id, "approved")).await?;
            assert_eq!(approved.status, PaymentStatus::Approved);

            let stored = properties::find_by_id(txn, property_id).await?.expect("listing");
            assert_eq!(stored.publication_status, PublicationStatus::Rejected);
            assert!(stored.paid_at.is_none());
            assert!(stored.payment_reference.is_none());
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn approval_commits_after_listing_is_deleted() -> Result<(), AppError> {
    let state = build_test_state().await;
    let cfg = BoldConfig::for_tests();
    let first_cfg = cfg.clone();

    let order_id = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let cfg = first_cfg;
            let owner = factory::user(txn).await;
            let listing = factory::listing(txn, owner.id, json!({})).await;
            let property_id = listing.listing.card.id;
            let checkout =
                create_checkout(txn, &cfg, owner.id, publication_request(property_id, &cfg))
                    .await?;
            listing_service::delete(txn, owner.id, property_id).await?;
            Ok::<_, AppError>(checkout.order_id)
        })
    })
    .await?;

    let approved = with_txn(None, &state, |txn| {
        let order_id = order_id.clone();
        Box::pin(async move {
            apply_provider_result(txn, &cfg, report(&order_id, "approved")).await
        })
    })
    .await?;
    assert_eq!(approved.status, PaymentStatus::Approved);

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let stored = payments::find_by_order_id(txn, &order_id)
                .await?
                .expect("payment row");
            assert_eq!(stored.status, PaymentStatus::Approved);
            assert!(stored.property_id.is_none());
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn client_order_ids_are_validated_and_unique() -> Result<(), AppError> {
    let state = build_test_state().await;
    let cfg = BoldConfig::for_tests();
    let first_cfg = cfg.clone();

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let cfg = first_cfg;
            let owner = factory::user(txn).await;
            let listing = factory::listing(txn, owner.id, json!({})).await;
            let property_id = listing.listing.card.id;

            let mut req = publication_request(property_id, &cfg);
            req.order_id = Some("bad id!".to_string());
            let err = create_checkout(txn, &cfg, owner.id, req).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidOrderId);

            let mut req = publication_request(property_id, &cfg);
            req.order_id = Some("order-123".to_string());
            let checkout = create_checkout(txn, &cfg, owner.id, req).await?;
            assert_eq!(checkout.order_id, "order-123");
            Ok::<_, AppError>(())
        })
    })
    .await?;

    // A duplicate insert fails its own transaction.
    let err = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let owner = factory::user(txn).await;
            let mut req = SignatureRequest {
                amount: Some(cfg.publication_price),
                currency: Some("COP".to_string()),
                ..Default::default()
            };
            req.order_id = Some("order-123".to_string());
            create_checkout(txn, &cfg, owner.id, req).await
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateOrderId);
    Ok(())
}

#[tokio::test]
async fn missing_secret_is_a_configuration_error() -> Result<(), AppError> {
    let state = build_test_state().await;
    let cfg = BoldConfig {
        secret_key: None,
        ..BoldConfig::for_tests()
    };

    let err = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let owner = factory::user(txn).await;
            let req = SignatureRequest {
                amount: Some(cfg.publication_price),
                currency: Some("COP".to_string()),
                ..Default::default()
            };
            create_checkout(txn, &cfg, owner.id, req).await
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PaymentsNotConfigured);
    assert_eq!(err.status().as_u16(), 500);
    Ok(())
}
