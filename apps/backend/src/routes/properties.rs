//! Public listing routes under `/api/properties`.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::entities::properties::PropertyStatus;
use crate::error::AppError;
use crate::extractors::PathId;
use crate::services::properties::{self, SearchParams};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct AutocompleteQuery {
    q: Option<String>,
    status: Option<PropertyStatus>,
}

/// GET /api/properties
async fn search(
    http_req: HttpRequest,
    query: web::Query<SearchParams>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let cards = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::search(txn, params).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(cards))
}

/// GET /api/properties/featured
async fn featured(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cards = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::featured(txn).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(cards))
}

/// GET /api/properties/autocomplete?q=&status=
async fn autocomplete(
    http_req: HttpRequest,
    query: web::Query<AutocompleteQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let AutocompleteQuery { q, status } = query.into_inner();
    let suggestions = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::autocomplete(txn, q.as_deref(), status).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(suggestions))
}

/// GET /api/properties/{id}
///
/// Counts a view on every successful read.
async fn detail(
    http_req: HttpRequest,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = id.0;
    let listing = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::detail(txn, id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(listing))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(search))
        .route("/featured", web::get().to(featured))
        .route("/autocomplete", web::get().to(autocomplete))
        .route("/{id}", web::get().to(detail));
}
