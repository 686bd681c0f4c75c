use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::factory;
use crate::support::test_state::{build_test_state, db};

#[actix_web::test]
async fn alert_lifecycle() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let auth = bearer_header(user.id, &user.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/alerts")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"city": "  Medellín ", "max_price": 500_000_000}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let alert = read_json(resp).await;
    assert_eq!(alert["city"], "Medellín");
    assert_eq!(alert["max_price"], 500_000_000);
    assert_eq!(alert["active"], true);
    let id = alert["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/me/alerts/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"active": false}))
        .to_request();
    let toggled = read_json(test::call_service(&app, req).await).await;
    assert_eq!(toggled["active"], false);

    let req = test::TestRequest::get()
        .uri("/api/me/alerts")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["active"], false);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/me/alerts/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/me/alerts/{id}"))
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "ALERT_NOT_FOUND", None).await;
}

#[actix_web::test]
async fn alert_without_criteria_is_rejected() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let user = factory::user(&conn).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/alerts")
        .insert_header(("Authorization", bearer_header(user.id, &user.email)))
        .set_json(json!({"city": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_ALERT", Some("at least one")).await;
}

#[actix_web::test]
async fn matches_only_published_listings_within_criteria() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let watcher = factory::user(&conn).await;

    let cheap = factory::published_listing(&conn, owner.id, json!({"price": 300_000_000})).await;
    factory::published_listing(&conn, owner.id, json!({"price": 900_000_000})).await;
    factory::published_listing(&conn, owner.id, json!({"price": 250_000_000, "city": "Bogotá"}))
        .await;
    factory::listing(&conn, owner.id, json!({"price": 200_000_000})).await;

    let auth = bearer_header(watcher.id, &watcher.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/alerts")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"city": "medellín", "max_price": 500_000_000}))
        .to_request();
    let alert = read_json(test::call_service(&app, req).await).await;
    let id = alert["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/me/alerts/{id}/matches"))
        .insert_header(("Authorization", auth))
        .to_request();
    let matches = read_json(test::call_service(&app, req).await).await;
    let ids: Vec<&str> = matches
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![cheap.to_string().as_str()]);
}

#[actix_web::test]
async fn city_match_folds_accented_uppercase() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let watcher = factory::user(&conn).await;
    let shouting = factory::published_listing(&conn, owner.id, json!({"city": "MEDELLÍN"})).await;

    let auth = bearer_header(watcher.id, &watcher.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/alerts")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"city": "medellín"}))
        .to_request();
    let alert = read_json(test::call_service(&app, req).await).await;
    let id = alert["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/me/alerts/{id}/matches"))
        .insert_header(("Authorization", auth))
        .to_request();
    let matches = read_json(test::call_service(&app, req).await).await;
    let items = matches.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], shouting.to_string());
}

#[actix_web::test]
async fn alerts_are_private_to_their_owner() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let other = factory::user(&conn).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/alerts")
        .insert_header(("Authorization", bearer_header(owner.id, &owner.email)))
        .set_json(json!({"property_type": "house"}))
        .to_request();
    let alert = read_json(test::call_service(&app, req).await).await;
    let id = alert["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/me/alerts/{id}/matches"))
        .insert_header(("Authorization", bearer_header(other.id, &other.email)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "ALERT_NOT_FOUND", None).await;
}
