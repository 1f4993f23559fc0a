use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use super::views::rfc3339;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = rfc3339(Some(OffsetDateTime::now_utc())).unwrap_or_else(|| "unknown".to_string());

    let (db, db_error) = match app_state.store() {
        Some(store) => match store.ping().await {
            Ok(()) => ("ok", None),
            Err(e) => ("error", Some(format!("ping failed: {e}"))),
        },
        None => ("unavailable", None),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
