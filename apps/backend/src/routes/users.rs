use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use super::guard::{ADMIN_ONLY, USER_OR_ADMIN};
use super::views::{DataResponse, ListResponse, MessageResponse, UserView};
use crate::auth::roles::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::identity::Identity;
use crate::extractors::object_id::UserId;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::users::{User, UserStatus, UserUpdate};
use crate::state::app_state::AppState;

fn user_not_found() -> AppError {
    AppError::not_found(ErrorCode::UserNotFound, "User not found")
}

fn parse_role(raw: &str) -> Result<Role, AppError> {
    raw.parse::<Role>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidRole, "Invalid role"))
}

fn parse_status(raw: &str) -> Result<UserStatus, AppError> {
    raw.parse::<UserStatus>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidStatus, "Invalid status"))
}

/// Empty strings count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserStatusView {
    fn summary(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: Some(user.name),
            email: Some(user.email),
            status: user.status,
        }
    }

    fn single(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: None,
            email: None,
            status: user.status,
        }
    }
}

impl UserRoleView {
    fn summary(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: Some(user.name),
            email: Some(user.email),
            role: user.role,
        }
    }

    fn single(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: None,
            email: None,
            role: user.role,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub role: Option<String>,
}

async fn all_users(app_state: &AppState) -> Result<Vec<User>, AppError> {
    app_state
        .require_store()?
        .list_users()
        .await
        .map_err(AppError::storage("Failed to get users"))
}

async fn one_user(app_state: &AppState, id: UserId) -> Result<User, AppError> {
    app_state
        .require_store()?
        .find_user(id.0)
        .await
        .map_err(AppError::storage("Failed to get user"))?
        .ok_or_else(user_not_found)
}

async fn apply_update(
    app_state: &AppState,
    id: UserId,
    update: UserUpdate,
) -> Result<User, AppError> {
    app_state
        .require_store()?
        .update_user(id.0, update)
        .await
        .map_err(AppError::storage("Failed to update user"))?
        .ok_or_else(user_not_found)
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = all_users(&app_state).await?;
    let data: Vec<UserView> = users.into_iter().map(UserView::from).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(data)))
}

async fn list_user_statuses(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = all_users(&app_state).await?;
    let data: Vec<_> = users.into_iter().map(UserStatusView::summary).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(data)))
}

async fn list_user_roles(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = all_users(&app_state).await?;
    let data: Vec<_> = users.into_iter().map(UserRoleView::summary).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(data)))
}

async fn get_user(id: UserId, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let user = one_user(&app_state, id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(UserView::from(user))))
}

/// Generic update. Only admins may change a role, and only to a known role.
async fn update_user(
    id: UserId,
    identity: Identity,
    body: ValidatedJson<UpdateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let mut update = UserUpdate::at(OffsetDateTime::now_utc());
    update.name = non_empty(body.name);
    update.email = non_empty(body.email);

    if let Some(role) = non_empty(body.role) {
        if !identity.has_role(Role::Admin) {
            warn!(user.id = %identity.id, user.role = %identity.role, "non-admin attempted role change");
            return Err(AppError::Forbidden);
        }
        update.role = Some(parse_role(&role)?.to_string());
    }

    let user = apply_update(&app_state, id, update).await?;
    Ok(HttpResponse::Ok().json(DataResponse::with_message(
        "User updated successfully",
        UserView::from(user),
    )))
}

async fn delete_user(
    id: UserId,
    identity: Identity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deleted = app_state
        .require_store()?
        .delete_user(id.0)
        .await
        .map_err(AppError::storage("Failed to delete user"))?;
    if !deleted {
        return Err(user_not_found());
    }

    info!(target.id = %id.0, by = %identity.id, "user deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}

async fn get_user_status(
    id: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = one_user(&app_state, id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(UserStatusView::single(user))))
}

async fn update_user_status(
    id: UserId,
    body: ValidatedJson<UpdateStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let status = parse_status(body.status.as_deref().unwrap_or_default())?;

    let mut update = UserUpdate::at(OffsetDateTime::now_utc());
    update.status = Some(status.to_string());
    let user = apply_update(&app_state, id, update).await?;

    Ok(HttpResponse::Ok().json(DataResponse::with_message(
        "User status updated successfully",
        UserView::from(user),
    )))
}

async fn get_user_role(id: UserId, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let user = one_user(&app_state, id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(UserRoleView::single(user))))
}

async fn update_user_role(
    id: UserId,
    body: ValidatedJson<UpdateRoleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let role = parse_role(body.role.as_deref().unwrap_or_default())?;

    let mut update = UserUpdate::at(OffsetDateTime::now_utc());
    update.role = Some(role.to_string());
    let user = apply_update(&app_state, id, update).await?;

    Ok(HttpResponse::Ok().json(DataResponse::with_message(
        "User role updated successfully",
        UserView::from(user),
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(ADMIN_ONLY.apply(web::get().to(list_users))))
        .service(
            web::resource("/status/all")
                .route(USER_OR_ADMIN.apply(web::get().to(list_user_statuses))),
        )
        .service(
            web::resource("/role/all").route(USER_OR_ADMIN.apply(web::get().to(list_user_roles))),
        )
        .service(
            web::resource("/{id}/status")
                .route(ADMIN_ONLY.apply(web::get().to(get_user_status)))
                .route(ADMIN_ONLY.apply(web::patch().to(update_user_status))),
        )
        .service(
            web::resource("/{id}/role")
                .route(ADMIN_ONLY.apply(web::get().to(get_user_role)))
                .route(ADMIN_ONLY.apply(web::patch().to(update_user_role))),
        )
        .service(
            web::resource("/{id}")
                .route(USER_OR_ADMIN.apply(web::get().to(get_user)))
                .route(USER_OR_ADMIN.apply(web::put().to(update_user)))
                .route(USER_OR_ADMIN.apply(web::patch().to(update_user)))
                .route(ADMIN_ONLY.apply(web::delete().to(delete_user))),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_and_status_parsing_use_fixed_messages() {
        assert_eq!(parse_role("moderator").unwrap(), Role::Moderator);
        assert_eq!(parse_role("root").unwrap_err().message(), "Invalid role");
        assert_eq!(parse_status("pending").unwrap(), UserStatus::Pending);
        assert_eq!(parse_status("").unwrap_err().message(), "Invalid status");
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".to_string())).as_deref(), Some("x"));
    }
}
