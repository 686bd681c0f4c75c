//! Public calculators and the bank directory. No database access.

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::simulators::{self, CreditRequest, SavingsRequest};

/// POST /api/simulators/credit
async fn credit(body: ValidatedJson<CreditRequest>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(simulators::credit(&body)?))
}

/// POST /api/simulators/savings
async fn savings(body: ValidatedJson<SavingsRequest>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(simulators::closing_savings(&body)?))
}

/// GET /api/banks
async fn list_banks() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(simulators::banks()))
}

/// GET /api/banks/{id}
async fn get_bank(id: web::Path<String>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(simulators::bank(&id)?))
}

pub fn configure_simulator_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/credit", web::post().to(credit))
        .route("/savings", web::post().to(savings));
}

pub fn configure_bank_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_banks))
        .route("/{id}", web::get().to(get_bank));
}
