use actix_web::test;
use habitat_backend::config::payments::BoldConfig;
use habitat_backend::state::app_state::AppState;
use habitat_backend::state::security_config::SecurityConfig;

use crate::common::read_json;
use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_latest_migration() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-trace-id"));

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["migrations"].as_str().unwrap().starts_with("m2025"));
    assert!(body.get("db_error").is_none());
}

#[actix_web::test]
async fn health_without_db_still_answers() {
    let state = AppState::new_without_db(SecurityConfig::default(), BoldConfig::for_tests());
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body = read_json(resp).await;
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
    assert!(body["db_error"].is_string());
}
