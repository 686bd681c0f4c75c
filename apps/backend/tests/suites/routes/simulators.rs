use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn credit_quote_from_formatted_value() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/simulators/credit")
        .set_json(json!({"property_value": "$ 300.000.000"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body = read_json(resp).await;
    assert_eq!(body["monthly_payment"], 3_600_504);
    assert_eq!(body["monthly_payment_display"], "$ 3.600.504");
    assert_eq!(body["months"], 180);
}

#[actix_web::test]
async fn credit_rejects_out_of_range_terms() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    for body in [
        json!({"property_value": 300_000_000, "term_years": 31}),
        json!({"property_value": 300_000_000, "term_years": 0}),
        json!({"property_value": 0}),
        json!({"property_value": "mucho"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/simulators/credit")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 400, "INVALID_SIMULATION", None).await;
    }
}

#[actix_web::test]
async fn savings_breakdown() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/simulators/savings")
        .set_json(json!({"property_value": 300_000_000}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["buyer"]["total"], 3_900_000);
    assert_eq!(body["seller"]["total"], 6_000_000);
    assert_eq!(body["total"], 9_900_000);
}

#[actix_web::test]
async fn bank_directory() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/banks").to_request();
    let banks = read_json(test::call_service(&app, req).await).await;
    let ids: Vec<&str> = banks
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"davivienda"));
    assert!(ids.contains(&"bancolombia"));

    let req = test::TestRequest::get()
        .uri("/api/banks/davivienda")
        .to_request();
    let bank = read_json(test::call_service(&app, req).await).await;
    assert_eq!(bank["name"], "Davivienda");

    let req = test::TestRequest::get()
        .uri("/api/banks/banco-fantasma")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "BANK_NOT_FOUND", None).await;
}
