use actix_web::test;
use serde_json::json;

use crate::common::assert_problem_details_structure;
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::factory;
use crate::support::test_state::{build_test_state, db};

#[actix_web::test]
async fn empty_body_is_required() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/simulators/credit")
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", Some("Request body is required"))
        .await;
}

#[actix_web::test]
async fn missing_field_is_named() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/wallet/deposits")
        .insert_header(("Authorization", bearer_header(user.id, &user.email)))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", Some("missing field `amount`"))
        .await;
}

#[actix_web::test]
async fn malformed_json_reports_line() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/simulators/savings")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"property_value\": }")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", Some("line 1")).await;
}

#[actix_web::test]
async fn unknown_enum_variant_is_named() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/alerts")
        .insert_header(("Authorization", bearer_header(user.id, &user.email)))
        .set_json(json!({"property_type": "castle"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", Some("unknown variant `castle`"))
        .await;
}
