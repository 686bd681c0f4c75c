use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::factory;
use crate::support::test_state::{build_test_state, db};

#[actix_web::test]
async fn get_profile_returns_caller() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/me/profile")
        .insert_header(("Authorization", bearer_header(user.id, &user.email)))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], user.email);
    assert_eq!(body["role"], "user");
}

#[actix_web::test]
async fn patch_sets_keeps_and_clears_fields() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let auth = bearer_header(user.id, &user.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri("/api/me/profile")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"full_name": "  Ana María Gómez ", "phone": "+57 300 123 4567"}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["full_name"], "Ana María Gómez");
    assert_eq!(body["phone"], "+57 300 123 4567");

    // Absent key keeps the value; null clears it.
    let req = test::TestRequest::patch()
        .uri("/api/me/profile")
        .insert_header(("Authorization", auth))
        .set_json(json!({"phone": null}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["full_name"], "Ana María Gómez");
    assert!(body["phone"].is_null());
}

#[actix_web::test]
async fn bad_phone_is_rejected() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri("/api/me/profile")
        .insert_header(("Authorization", bearer_header(user.id, &user.email)))
        .set_json(json!({"phone": "call me maybe"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_PROFILE", Some("phone")).await;
}
