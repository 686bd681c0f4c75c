use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use habitat_backend::config::app::Config;
use habitat_backend::config::db::RuntimeEnv;
use habitat_backend::infra::state::build_state;
use habitat_backend::middleware::rate_limit::{api_rate_limit_config, payments_rate_limit_config};
use habitat_backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use habitat_backend::routes;
use habitat_backend::state::security_config::SecurityConfig;
use habitat_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing(telemetry::LogFormat::from_env());

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, db = ?config.db_kind, "starting Habitat backend");

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(config.db_kind)
        .with_security(SecurityConfig::new(config.jwt_secret.as_bytes()))
        .with_payments(config.payments.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);
    let payload_limit = config.max_json_payload_size;
    // Built once so every worker counts against the same buckets.
    let payments_backend = InMemoryBackend::builder().build();
    let api_backend = InMemoryBackend::builder().build();

    HttpServer::new(move || {
        let payments_limiter =
            RateLimiter::builder(payments_backend.clone(), payments_rate_limit_config().build())
                .add_headers()
                .build();
        let api_limiter =
            RateLimiter::builder(api_backend.clone(), api_rate_limit_config().build())
                .add_headers()
                .build();

        App::new()
            .wrap(cors_middleware())
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(web::PayloadConfig::new(payload_limit))
            .configure(routes::health::configure_routes)
            .service(
                web::scope("/api/payments/bold")
                    .wrap(payments_limiter)
                    .configure(routes::payments::configure_routes),
            )
            .service(
                web::scope("/api")
                    .wrap(api_limiter)
                    .configure(routes::configure_api),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
