use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::entities::properties::PublicationStatus;
use crate::error::AppError;
use crate::extractors::{CurrentUser, PathId, ValidatedJson};
use crate::services::properties;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct PublicationChange {
    publication_status: PublicationStatus,
}

/// PATCH /api/admin/properties/{id}/publication
///
/// The role check lives in the service so every caller gets it.
async fn moderate_publication(
    http_req: HttpRequest,
    user: CurrentUser,
    id: PathId,
    body: ValidatedJson<PublicationChange>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let admin = user.into_profile();
    let (id, target) = (id.0, body.publication_status);
    let listing = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { properties::moderate(txn, &admin, id, target).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(listing))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/properties/{id}/publication",
        web::patch().to(moderate_publication),
    );
}
