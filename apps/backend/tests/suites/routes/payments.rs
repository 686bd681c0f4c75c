use actix_web::test;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use habitat_backend::config::payments::BoldConfig;
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use uuid::Uuid;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::factory;
use crate::support::test_state::{build_test_state, build_test_state_with, db, TEST_WEBHOOK_SECRET};

fn signature_body(payment_type: &str, property_id: Uuid, amount: i64) -> Value {
    json!({
        "amount": amount,
        "currency": "COP",
        "paymentType": payment_type,
        "propertyId": property_id,
    })
}

fn sign_webhook(body: &[u8], secret: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac key");
    mac.update(BASE64.encode(body).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[actix_web::test]
async fn publication_checkout_then_approval_publishes_listing() {
    let cfg = BoldConfig::for_tests();
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let listing = factory::listing(&conn, owner.id, json!({})).await;
    let property_id = listing.listing.card.id;
    let auth = bearer_header(owner.id, &owner.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/signature")
        .insert_header(("Authorization", auth.clone()))
        .set_json(signature_body("publication", property_id, cfg.publication_price))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let checkout = read_json(resp).await;
    let order_id = checkout["orderId"].as_str().unwrap().to_string();
    assert!(order_id.starts_with(&format!("publication_{property_id}_")));
    assert_eq!(checkout["integritySignature"].as_str().unwrap().len(), 64);
    assert_eq!(checkout["checkout"]["apiKey"], "test-api-key");
    assert_eq!(checkout["checkout"]["amount"], cfg.publication_price);
    assert_eq!(
        checkout["checkout"]["redirectionUrl"],
        "http://localhost:3000/dashboard/payment-result"
    );

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/verify")
        .set_json(json!({"order_id": order_id, "status": "approved", "transaction_id": "tx-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let verified = read_json(resp).await;
    assert_eq!(verified["success"], true);
    assert_eq!(verified["status"], "approved");
    assert_eq!(verified["payment_type"], "publication");

    let req = test::TestRequest::get()
        .uri(&format!("/api/me/properties/{property_id}"))
        .insert_header(("Authorization", auth))
        .to_request();
    let detail = read_json(test::call_service(&app, req).await).await;
    assert_eq!(detail["publication_status"], "published");
    assert!(!detail["paid_at"].is_null());

    // Repeating the same report is a no-op; a different one conflicts.
    let req = test::TestRequest::post()
        .uri("/api/payments/bold/verify")
        .set_json(json!({"order_id": order_id, "status": "approved"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/verify")
        .set_json(json!({"order_id": order_id, "status": "rejected"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "PAYMENT_ALREADY_FINALIZED", None).await;
}

#[actix_web::test]
async fn featured_approval_marks_listing_featured() {
    let cfg = BoldConfig::for_tests();
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let property_id = factory::published_listing(&conn, owner.id, json!({})).await;
    let auth = bearer_header(owner.id, &owner.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/signature")
        .insert_header(("Authorization", auth))
        .set_json(signature_body("featured", property_id, cfg.featured_price))
        .to_request();
    let checkout = read_json(test::call_service(&app, req).await).await;
    let order_id = checkout["orderId"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/verify")
        .set_json(json!({"order_id": order_id, "status": "APPROVED"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::get()
        .uri("/api/properties/featured")
        .to_request();
    let featured = read_json(test::call_service(&app, req).await).await;
    assert_eq!(featured[0]["id"], property_id.to_string());
    assert_eq!(featured[0]["featured"], true);
}

#[actix_web::test]
async fn checkout_validation() {
    let cfg = BoldConfig::for_tests();
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let other = factory::user(&conn).await;
    let listing = factory::listing(&conn, owner.id, json!({})).await;
    let property_id = listing.listing.card.id;
    let app = create_test_app(state).with_prod_routes().build().await;
    let auth = bearer_header(owner.id, &owner.email);

    let cases = [
        (
            signature_body("publication", property_id, cfg.publication_price + 1),
            400,
            "INVALID_PAYMENT_AMOUNT",
        ),
        (
            json!({"amount": cfg.publication_price, "currency": "USD", "propertyId": property_id}),
            400,
            "INVALID_CURRENCY",
        ),
        (
            signature_body("vip", property_id, cfg.publication_price),
            400,
            "INVALID_PAYMENT_TYPE",
        ),
        (json!({"currency": "COP"}), 400, "BAD_REQUEST"),
    ];
    for (body, status, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/payments/bold/signature")
            .insert_header(("Authorization", auth.clone()))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, status, code, None).await;
    }

    // Someone else's listing.
    let req = test::TestRequest::post()
        .uri("/api/payments/bold/signature")
        .insert_header(("Authorization", bearer_header(other.id, &other.email)))
        .set_json(signature_body("publication", property_id, cfg.publication_price))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "PROPERTY_NOT_FOUND", None).await;
}

#[actix_web::test]
async fn verify_unknown_order_and_missing_fields() {
    let state = build_test_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/verify")
        .set_json(json!({"order_id": "publication_none_nope", "status": "approved"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "PAYMENT_NOT_FOUND", None).await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/verify")
        .set_json(json!({"status": "approved"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", Some("order_id")).await;
}

#[actix_web::test]
async fn signed_webhook_is_required_when_secret_is_set() {
    let cfg = BoldConfig::for_tests().with_webhook_secret(TEST_WEBHOOK_SECRET);
    let state = build_test_state_with(cfg.clone()).await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let listing = factory::listing(&conn, owner.id, json!({})).await;
    let property_id = listing.listing.card.id;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/signature")
        .insert_header(("Authorization", bearer_header(owner.id, &owner.email)))
        .set_json(signature_body("publication", property_id, cfg.publication_price))
        .to_request();
    let checkout = read_json(test::call_service(&app, req).await).await;
    let order_id = checkout["orderId"].as_str().unwrap();

    let body = serde_json::to_vec(&json!({"order_id": order_id, "status": "rejected"})).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/webhook")
        .insert_header(("content-type", "application/json"))
        .set_payload(body.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "INVALID_WEBHOOK_SIGNATURE", None).await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/webhook")
        .insert_header(("x-bold-signature", sign_webhook(&body, "wrong-secret")))
        .set_payload(body.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "INVALID_WEBHOOK_SIGNATURE", None).await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/webhook")
        .insert_header(("x-bold-signature", sign_webhook(&body, TEST_WEBHOOK_SECRET)))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(read_json(resp).await, json!({"success": true}));

    let req = test::TestRequest::get()
        .uri(&format!("/api/payments/bold/result?bold-order-id={order_id}"))
        .to_request();
    let outcome = read_json(test::call_service(&app, req).await).await;
    assert_eq!(outcome["state"], "rejected");
}

#[actix_web::test]
async fn unsigned_webhook_is_accepted_without_secret() {
    let cfg = BoldConfig::for_tests();
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let listing = factory::listing(&conn, owner.id, json!({})).await;
    let property_id = listing.listing.card.id;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/signature")
        .insert_header(("Authorization", bearer_header(owner.id, &owner.email)))
        .set_json(signature_body("publication", property_id, cfg.publication_price))
        .to_request();
    let checkout = read_json(test::call_service(&app, req).await).await;
    let order_id = checkout["orderId"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/webhook")
        .set_json(json!({"order_id": order_id, "status": "approved"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/webhook")
        .set_payload("not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", None).await;
}

#[actix_web::test]
async fn redirect_result_states() {
    let cfg = BoldConfig::for_tests();
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let listing = factory::listing(&conn, owner.id, json!({})).await;
    let property_id = listing.listing.card.id;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/signature")
        .insert_header(("Authorization", bearer_header(owner.id, &owner.email)))
        .set_json(signature_body("publication", property_id, cfg.publication_price))
        .to_request();
    let checkout = read_json(test::call_service(&app, req).await).await;
    let order_id = checkout["orderId"].as_str().unwrap().to_string();

    let cases = [
        ("/api/payments/bold/result".to_string(), "error"),
        (
            "/api/payments/bold/result?bold-order-id=unknown_order&bold-tx-status=approved"
                .to_string(),
            "error",
        ),
        (
            format!("/api/payments/bold/result?bold-order-id={order_id}"),
            "pending",
        ),
        (
            format!("/api/payments/bold/result?bold-order-id={order_id}&bold-tx-status=processing"),
            "pending",
        ),
        (
            format!("/api/payments/bold/result?bold-order-id={order_id}&bold-tx-status=approved"),
            "approved",
        ),
        // A late conflicting report shows what is stored.
        (
            format!("/api/payments/bold/result?bold-order-id={order_id}&bold-tx-status=rejected"),
            "approved",
        ),
    ];
    for (uri, expected) in cases {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200, "{uri}");
        let body = read_json(resp).await;
        assert_eq!(body["state"], expected, "{uri}");
    }
}
