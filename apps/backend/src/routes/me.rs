//! Signed-in owner routes under `/api/me`.
//!
//! Every handler here runs behind `JwtExtract`; `CurrentUser` provisions
//! the profile on first use.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::db::txn::with_txn;
use crate::domain::listing::ListingDraft;
use crate::error::AppError;
use crate::extractors::{CurrentUser, PathId, ValidatedJson};
use crate::services::alerts::{self, AlertRequest, AlertToggle};
use crate::services::profiles::{self, ProfilePatch};
use crate::services::properties;
use crate::services::wallet::{self, DepositRequest};
use crate::state::app_state::AppState;

// ----- profile -----

/// GET /api/me/profile
async fn get_profile(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(user.into_profile()))
}

/// PATCH /api/me/profile
async fn patch_profile(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<ProfilePatch>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = user.into_profile();
    let patch = body.into_inner();
    let updated = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { profiles::update_contact(txn, &profile, patch).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/me/dashboard
async fn dashboard(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = user.into_profile();
    let dashboard = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::dashboard(txn, profile).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

// ----- listings -----

/// GET /api/me/properties
async fn list_properties(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let listings = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::list_mine(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(listings))
}

/// POST /api/me/properties
async fn create_property(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<ListingDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let draft = body.into_inner();
    let listing = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::create(txn, user_id, draft).await })
    })
    .await?;
    Ok(HttpResponse::Created().json(listing))
}

/// GET /api/me/properties/{id}
async fn get_property(
    http_req: HttpRequest,
    user: CurrentUser,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (user_id, id) = (user.id(), id.0);
    let listing = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::get_mine(txn, user_id, id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// PUT /api/me/properties/{id}
async fn update_property(
    http_req: HttpRequest,
    user: CurrentUser,
    id: PathId,
    body: ValidatedJson<ListingDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (user_id, id) = (user.id(), id.0);
    let draft = body.into_inner();
    let listing = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::update(txn, user_id, id, draft).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// DELETE /api/me/properties/{id}
async fn delete_property(
    http_req: HttpRequest,
    user: CurrentUser,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (user_id, id) = (user.id(), id.0);
    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::delete(txn, user_id, id).await })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

// ----- alerts -----

/// GET /api/me/alerts
async fn list_alerts(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let found = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { alerts::list(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(found))
}

/// POST /api/me/alerts
async fn create_alert(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<AlertRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let req = body.into_inner();
    let alert = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { alerts::create(txn, user_id, req).await })
    })
    .await?;
    Ok(HttpResponse::Created().json(alert))
}

/// PATCH /api/me/alerts/{id}
async fn toggle_alert(
    http_req: HttpRequest,
    user: CurrentUser,
    id: PathId,
    body: ValidatedJson<AlertToggle>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (user_id, id) = (user.id(), id.0);
    let active = body.active;
    let alert = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { alerts::set_active(txn, user_id, id, active).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(alert))
}

/// DELETE /api/me/alerts/{id}
async fn delete_alert(
    http_req: HttpRequest,
    user: CurrentUser,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (user_id, id) = (user.id(), id.0);
    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { alerts::delete(txn, user_id, id).await })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/me/alerts/{id}/matches
async fn alert_matches(
    http_req: HttpRequest,
    user: CurrentUser,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (user_id, id) = (user.id(), id.0);
    let cards = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { alerts::matches(txn, user_id, id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(cards))
}

// ----- wallet -----

/// GET /api/me/wallet
async fn get_wallet(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let overview = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { wallet::overview(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(overview))
}

/// POST /api/me/wallet/deposits
async fn deposit(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<DepositRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let req = body.into_inner();
    let receipt = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { wallet::deposit(txn, user_id, req).await })
    })
    .await?;
    Ok(HttpResponse::Created().json(receipt))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/profile")
            .route(web::get().to(get_profile))
            .route(web::patch().to(patch_profile)),
    )
    .route("/dashboard", web::get().to(dashboard))
    .service(
        web::resource("/properties")
            .route(web::get().to(list_properties))
            .route(web::post().to(create_property)),
    )
    .service(
        web::resource("/properties/{id}")
            .route(web::get().to(get_property))
            .route(web::put().to(update_property))
            .route(web::delete().to(delete_property)),
    )
    .service(
        web::resource("/alerts")
            .route(web::get().to(list_alerts))
            .route(web::post().to(create_alert)),
    )
    .service(
        web::resource("/alerts/{id}")
            .route(web::patch().to(toggle_alert))
            .route(web::delete().to(delete_alert)),
    )
    .route("/alerts/{id}/matches", web::get().to(alert_matches))
    .route("/wallet", web::get().to(get_wallet))
    .route("/wallet/deposits", web::post().to(deposit));
}
