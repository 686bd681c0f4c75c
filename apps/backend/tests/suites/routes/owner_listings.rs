use actix_web::test;
use serde_json::json;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::bearer_header;
use crate::support::create_test_app;
use crate::support::factory::{self, draft_json};
use crate::support::test_state::{build_test_state, db};

#[actix_web::test]
async fn create_read_update_delete_own_listing() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let auth = bearer_header(owner.id, &owner.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/properties")
        .insert_header(("Authorization", auth.clone()))
        .set_json(draft_json(json!({})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created = read_json(resp).await;
    assert_eq!(created["publication_status"], "pending_payment");
    assert_eq!(created["badge"]["label"], "Pendiente de Pago");
    assert!(created["property_id_code"].as_str().unwrap().starts_with("HB-"));
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/me/properties/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .set_json(draft_json(json!({
            "title": "Apartamento remodelado",
            "price": 470_000_000,
            "images": [{"url": "https://cdn.habitat.test/c.jpg"}],
            "amenities": ["Ascensor"],
            "publication_status": "published"
        })))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let updated = read_json(resp).await;
    assert_eq!(updated["title"], "Apartamento remodelado");
    assert_eq!(updated["price"], 470_000_000);
    assert_eq!(updated["amenities"], json!(["Ascensor"]));
    assert_eq!(updated["images"].as_array().unwrap().len(), 1);
    assert_eq!(updated["images"][0]["is_primary"], true);
    // Publication state only moves through payments or moderation.
    assert_eq!(updated["publication_status"], "pending_payment");

    let req = test::TestRequest::get()
        .uri("/api/me/properties")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let list = read_json(test::call_service(&app, req).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/me/properties/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/me/properties/{id}"))
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "PROPERTY_NOT_FOUND", None).await;
}

#[actix_web::test]
async fn invalid_draft_is_rejected() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let auth = bearer_header(owner.id, &owner.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/me/properties")
        .insert_header(("Authorization", auth.clone()))
        .set_json(draft_json(json!({"price": 0})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_LISTING", None).await;

    let req = test::TestRequest::post()
        .uri("/api/me/properties")
        .insert_header(("Authorization", auth))
        .set_json(draft_json(json!({"bank_id": "banco-fantasma"})))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_LISTING", Some("banco-fantasma")).await;
}

#[actix_web::test]
async fn other_owners_listings_are_not_found() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let intruder = factory::user(&conn).await;
    let listing = factory::listing(&conn, owner.id, json!({})).await;
    let id = listing.listing.card.id;
    let auth = bearer_header(intruder.id, &intruder.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/me/properties/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);

    let req = test::TestRequest::put()
        .uri(&format!("/api/me/properties/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .set_json(draft_json(json!({})))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/me/properties/{id}"))
        .insert_header(("Authorization", auth))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn dashboard_counts_and_recent_listings() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    for _ in 0..2 {
        factory::listing(&conn, owner.id, json!({})).await;
    }
    for _ in 0..2 {
        factory::published_listing(&conn, owner.id, json!({})).await;
    }
    let auth = bearer_header(owner.id, &owner.email);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/me/dashboard")
        .insert_header(("Authorization", auth))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["profile"]["id"], owner.id.to_string());
    assert_eq!(
        body["stats"],
        json!({
            "total_properties": 4,
            "published_properties": 2,
            "pending_payment": 2,
            "featured_properties": 0
        })
    );
    assert_eq!(body["recent_properties"].as_array().unwrap().len(), 3);
}
