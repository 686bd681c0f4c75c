use actix_web::test;
use uuid::Uuid;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::{bearer_header, mint_expired_token};
use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn me_routes_require_a_bearer_token() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    for uri in ["/api/me/profile", "/api/me/dashboard", "/api/me/wallet"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(
            resp,
            401,
            "UNAUTHORIZED_MISSING_BEARER",
            Some("Missing or malformed Bearer token"),
        )
        .await;
    }
}

#[actix_web::test]
async fn garbage_and_expired_tokens_are_distinguished() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/api/me/profile")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "UNAUTHORIZED_INVALID_JWT", None).await;

    let expired = mint_expired_token(Uuid::new_v4(), "late@example.test");
    let req = test::TestRequest::get()
        .uri("/api/me/profile")
        .insert_header(("Authorization", format!("Bearer {expired}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "UNAUTHORIZED_EXPIRED_JWT", None).await;
}

#[actix_web::test]
async fn admin_and_signature_routes_are_guarded() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/properties/{}/publication", Uuid::new_v4()))
        .set_json(serde_json::json!({"publication_status": "published"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let req = test::TestRequest::post()
        .uri("/api/payments/bold/signature")
        .set_json(serde_json::json!({"amount": 50000, "currency": "COP"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn first_request_provisions_the_profile() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;
    let sub = Uuid::new_v4();

    let req = test::TestRequest::get()
        .uri("/api/me/profile")
        .insert_header(("Authorization", bearer_header(sub, "nueva@example.test")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body = read_json(resp).await;
    assert_eq!(body["id"], sub.to_string());
    assert_eq!(body["email"], "nueva@example.test");
    assert_eq!(body["role"], "user");

    // A changed email in the token is carried over to the stored profile.
    let req = test::TestRequest::get()
        .uri("/api/me/profile")
        .insert_header(("Authorization", bearer_header(sub, "cambio@example.test")))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["id"], sub.to_string());
    assert_eq!(body["email"], "cambio@example.test");
}
