use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::factory;
use crate::support::test_state::{build_test_state, db};

#[actix_web::test]
async fn wallet_starts_empty() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/me/wallet")
        .insert_header(("Authorization", bearer_header(user.id, &user.email)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body = read_json(resp).await;
    assert_eq!(body["wallet"]["user_id"], user.id.to_string());
    assert_eq!(body["wallet"]["balance"], 0);
    assert!(body["transactions"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn deposits_accumulate_and_are_listed() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let auth = bearer_header(user.id, &user.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    for (amount, expected) in [(150_000, 150_000), (50_000, 200_000)] {
        let req = test::TestRequest::post()
            .uri("/api/me/wallet/deposits")
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({"amount": amount}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
        let receipt = read_json(resp).await;
        assert_eq!(receipt["balance"], expected);
        assert_eq!(receipt["transaction"]["transaction_type"], "deposit");
        assert_eq!(receipt["transaction"]["transaction_status"], "completed");
        assert_eq!(receipt["transaction"]["amount"], amount);
    }

    let req = test::TestRequest::get()
        .uri("/api/me/wallet")
        .insert_header(("Authorization", auth))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["wallet"]["balance"], 200_000);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn deposit_bounds_are_enforced() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let auth = bearer_header(user.id, &user.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    for amount in [0_i64, -10, 1_000_000_001] {
        let req = test::TestRequest::post()
            .uri("/api/me/wallet/deposits")
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({"amount": amount}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 400, "INVALID_DEPOSIT", None).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/me/wallet")
        .insert_header(("Authorization", auth))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["wallet"]["balance"], 0);
}
