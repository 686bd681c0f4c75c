//! Bold checkout routes under `/api/payments/bold`.
//!
//! Only `/signature` needs a signed-in user. Verification, webhook and
//! redirect all funnel into `apply_provider_result`, which lets the first
//! writer finalize a payment.

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::bold::signature::webhook_signature_valid;
use crate::bold::status::RedirectResult;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::validated_json::parse_body;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::logging::security;
use crate::middleware::JwtExtract;
use crate::services::payments::{
    self, ProviderResult, ProviderResultBody, SignatureRequest, VerifyResponse,
};
use crate::state::app_state::AppState;

/// Header carrying the hex HMAC of a webhook body.
pub const SIGNATURE_HEADER: &str = "x-bold-signature";

/// POST /api/payments/bold/signature
async fn signature(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<SignatureRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id();
    let req = body.into_inner();
    let cfg = app_state.payments.clone();
    let checkout = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { payments::create_checkout(txn, &cfg, user_id, req).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(checkout))
}

async fn apply(
    http_req: &HttpRequest,
    app_state: &AppState,
    result: ProviderResult,
) -> Result<VerifyResponse, AppError> {
    let cfg = app_state.payments.clone();
    let payment = with_txn(Some(http_req), app_state, |txn| {
        Box::pin(async move { payments::apply_provider_result(txn, &cfg, result).await })
    })
    .await?;
    Ok(VerifyResponse::from(&payment))
}

/// POST /api/payments/bold/verify
async fn verify(
    http_req: HttpRequest,
    body: ValidatedJson<ProviderResultBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = ProviderResult::try_from(body.into_inner())?;
    let response = apply(&http_req, &app_state, result).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/payments/bold/webhook
///
/// With a webhook secret configured, the body must carry a valid
/// `x-bold-signature`; without one, bodies are accepted unsigned.
async fn webhook(
    http_req: HttpRequest,
    body: web::Bytes,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if let Some(secret) = app_state.payments.webhook_secret.as_deref() {
        let signature = http_req
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());
        let valid = signature.is_some_and(|sig| webhook_signature_valid(&body, sig, secret));
        if !valid {
            security::webhook_signature_rejected(signature);
            return Err(AppError::InvalidWebhookSignature);
        }
    }

    let result = ProviderResult::try_from(parse_body::<ProviderResultBody>(&body)?)?;
    apply(&http_req, &app_state, result).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// GET /api/payments/bold/result?bold-order-id=&bold-tx-status=
async fn redirect_result(
    http_req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let redirect = RedirectResult::from_query(&query);
    let cfg = app_state.payments.clone();
    let outcome = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { payments::redirect_result(txn, &cfg, redirect).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/signature")
            .wrap(JwtExtract)
            .route(web::post().to(signature)),
    )
    .route("/verify", web::post().to(verify))
    .route("/webhook", web::post().to(webhook))
    .route("/result", web::get().to(redirect_result));
}
