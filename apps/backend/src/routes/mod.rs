use actix_web::web;

use crate::middleware::JwtExtract;

pub mod admin;
pub mod health;
pub mod me;
pub mod payments;
pub mod properties;
pub mod simulators;

/// Full route tree with auth guards but no rate limiting.
///
/// `main.rs` mounts the same configure functions under rate-limited scopes;
/// tests mount this directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(web::scope("/api/payments/bold").configure(payments::configure_routes))
        .service(web::scope("/api").configure(configure_api));
}

/// Everything under `/api` except the payment routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/properties").configure(properties::configure_routes))
        .service(
            web::scope("/me")
                .wrap(JwtExtract)
                .configure(me::configure_routes),
        )
        .service(
            web::scope("/admin")
                .wrap(JwtExtract)
                .configure(admin::configure_routes),
        )
        .service(web::scope("/simulators").configure(simulators::configure_simulator_routes))
        .service(web::scope("/banks").configure(simulators::configure_bank_routes));
}
