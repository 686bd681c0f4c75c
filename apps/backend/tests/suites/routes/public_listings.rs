use actix_web::test;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::create_test_app;
use crate::support::factory;
use crate::support::test_state::{build_test_state, db};

#[actix_web::test]
async fn search_lists_only_published_newest_first() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let hidden = factory::listing(&conn, owner.id, json!({"title": "Borrador"})).await;
    let older = factory::published_listing(&conn, owner.id, json!({"title": "Casa Laureles"})).await;
    let newer = factory::published_listing(&conn, owner.id, json!({"title": "Loft Envigado"})).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/properties").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body = read_json(resp).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();

    assert!(!ids.contains(&hidden.listing.card.id.to_string().as_str()));
    let newer_pos = ids.iter().position(|id| *id == newer.to_string()).unwrap();
    let older_pos = ids.iter().position(|id| *id == older.to_string()).unwrap();
    assert!(newer_pos < older_pos);

    let card = &body[newer_pos];
    assert_eq!(card["image_url"], "https://cdn.habitat.test/a.jpg");
    assert_eq!(card["price_display"], "$ 450.000.000");
    assert_eq!(card["featured"], false);
}

#[actix_web::test]
async fn search_filters_combine() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    factory::published_listing(
        &conn,
        owner.id,
        json!({"title": "Casa campestre", "property_type": "house", "city": "Rionegro", "price": 800_000_000, "bedrooms": 4}),
    )
    .await;
    let target = factory::published_listing(
        &conn,
        owner.id,
        json!({"title": "Apartaestudio", "city": "Bogota", "price": 200_000_000, "bedrooms": 1, "amenities": ["Terraza"]}),
    )
    .await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/properties?type=apartment&max_price=300000000&amenities=terraza")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], target.to_string());

    let req = test::TestRequest::get()
        .uri("/api/properties?q=campestre&bedrooms=3")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["city"], "Rionegro");

    let req = test::TestRequest::get()
        .uri("/api/properties?q=nothing-like-this")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn text_filters_fold_accented_uppercase() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let id = factory::published_listing(
        &conn,
        owner.id,
        json!({"title": "ÁTICO DÚPLEX", "city": "MEDELLÍN", "amenities": ["ÁREA BBQ"]}),
    )
    .await;
    let app = create_test_app(state).with_prod_routes().build().await;

    // medellín, ático, área bbq
    for uri in [
        "/api/properties?city=medell%C3%ADn",
        "/api/properties?q=%C3%A1tico",
        "/api/properties?amenities=%C3%A1rea%20bbq",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1, "{uri}");
        assert_eq!(items[0]["id"], id.to_string());
    }

    let req = test::TestRequest::get()
        .uri("/api/properties/autocomplete?q=d%C3%BAplex")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn offset_past_ceiling_is_a_bad_request() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    factory::published_listing(&conn, owner.id, json!({})).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/properties?offset=18446744073709551615")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", Some("offset must be at most 10000"))
        .await;

    let req = test::TestRequest::get()
        .uri("/api/properties?offset=10000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(read_json(resp).await.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn featured_falls_back_to_newest() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let id = factory::published_listing(&conn, owner.id, json!({})).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/properties/featured").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.to_string());
}

#[actix_web::test]
async fn autocomplete_needs_two_characters() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    factory::published_listing(&conn, owner.id, json!({"title": "Penthouse Provenza"})).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/properties/autocomplete?q=p").to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert!(body.as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/properties/autocomplete?q=proven&status=for_sale")
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Penthouse Provenza");
    assert_eq!(items[0]["image_url"], "https://cdn.habitat.test/a.jpg");
}

#[actix_web::test]
async fn detail_counts_views_and_hides_unpublished() {
    let state = build_test_state().await;
    let conn = db(&state).clone();
    let owner = factory::user(&conn).await;
    let draft = factory::listing(&conn, owner.id, json!({})).await;
    let id = factory::published_listing(&conn, owner.id, json!({})).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    for expected_views in [1, 2] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/properties/{id}"))
            .to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        assert_eq!(body["views"], expected_views);
        assert_eq!(body["bank"]["id"], "bancolombia");
        assert_eq!(body["images"].as_array().unwrap().len(), 2);
        assert_eq!(body["amenities"], json!(["Gimnasio", "Piscina"]));
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/properties/{}", draft.listing.card.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "PROPERTY_NOT_FOUND", None).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/properties/{}", Uuid::new_v4()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn malformed_id_is_a_bad_request() {
    let app = create_test_app(build_test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/properties/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_ID", None).await;
}
