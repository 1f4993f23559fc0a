use actix_web::{web, App, HttpServer};
use catalog_api::config::app::Config;
use catalog_api::infra::state::StateBuilder;
use catalog_api::middleware::cors::cors_middleware;
use catalog_api::middleware::request_trace::RequestTrace;
use catalog_api::middleware::structured_logger::StructuredLogger;
use catalog_api::routes;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is fine; the runtime environment may provide everything.
    let dotenv = dotenvy::dotenv();
    telemetry::init_tracing();
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if config.jwt_secret.is_none() {
        warn!("JWT_SECRET is not set; authenticated routes will answer 500");
    }

    let app_state = match StateBuilder::from_config(&config) {
        Ok(builder) => builder.build().await,
        Err(e) => Err(e),
    };
    let app_state = match app_state {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        production = config.runtime_env.is_production(),
        "starting catalog api"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
