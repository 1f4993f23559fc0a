use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::info;

use super::guard::GuardChain;
use super::views::MessageResponse;
use crate::auth::claims::IdentityClaims;
use crate::auth::cookie::removal_cookie;
use crate::error::AppError;
use crate::extractors::identity::Identity;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: IdentityClaims,
}

/// The verified claims of the caller.
async fn profile(identity: Identity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        user: identity.0,
    }))
}

/// Clear the auth cookie. Works with or without a session.
async fn logout(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    info!("logout");
    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(&app_state.security))
        .json(MessageResponse::new("Logged out successfully")))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/profile").route(GuardChain::authenticated().apply(web::get().to(profile))),
    )
    .service(web::resource("/logout").route(web::post().to(logout)));
}
