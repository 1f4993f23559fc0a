use actix_web::{web, HttpResponse};
use bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;

use super::guard::{GuardChain, ADMIN_ONLY};
use super::views::{DataResponse, ListResponse, MessageResponse, ProductView, UserView};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::identity::{Identity, MaybeIdentity};
use crate::extractors::object_id::ProductId;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::products::{NewProduct, ProductUpdate, DEFAULT_PRODUCT_STATUS};
use crate::state::app_state::AppState;

fn product_not_found() -> AppError {
    AppError::not_found(ErrorCode::ProductNotFound, "Product not found")
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub badge: Option<String>,
    pub live_link: Option<String>,
    pub repo_link: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub cta: Option<Value>,
    pub theme: Option<Value>,
    pub status: Option<String>,
    pub order: Option<i64>,
    pub posted_by: Option<String>,
}

/// Fields accepted on update. Anything else in the body (`postedBy`, `_id`,
/// `createdAt`, unknown keys) is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub badge: Option<String>,
    pub live_link: Option<String>,
    pub repo_link: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub cta: Option<Value>,
    pub theme: Option<Value>,
    pub status: Option<String>,
    pub order: Option<i64>,
}

impl UpdateProductRequest {
    fn into_update(self, updated_at: OffsetDateTime) -> ProductUpdate {
        ProductUpdate {
            slug: self.slug,
            title: self.title,
            tagline: self.tagline,
            description: self.description,
            cover_image: self.cover_image,
            badge: self.badge,
            live_link: self.live_link,
            repo_link: self.repo_link,
            highlights: self.highlights,
            features: self.features,
            cta: self.cta,
            theme: self.theme,
            status: self.status,
            order: self.order,
            updated_at,
        }
    }
}

async fn create_product(
    identity: Identity,
    body: ValidatedJson<CreateProductRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(slug), Some(title), Some(posted_by)) = (
        present(body.slug),
        present(body.title),
        present(body.posted_by),
    ) else {
        return Err(AppError::bad_request(
            ErrorCode::RequiredFieldsMissing,
            "Required fields missing",
        ));
    };

    let posted_by = ObjectId::parse_str(&posted_by)
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidUserId, "Invalid user id"))?;

    let store = app_state.require_store()?;
    let poster = store
        .find_user(posted_by)
        .await
        .map_err(AppError::storage("Failed to create product"))?;
    if poster.is_none() {
        return Err(AppError::not_found(ErrorCode::UserNotFound, "User not found"));
    }

    let product = store
        .insert_product(NewProduct {
            slug,
            title,
            tagline: body.tagline,
            description: body.description,
            cover_image: body.cover_image,
            badge: body.badge,
            live_link: body.live_link,
            repo_link: body.repo_link,
            highlights: body.highlights,
            features: body.features,
            cta: body.cta,
            theme: body.theme,
            status: present(body.status).unwrap_or_else(|| DEFAULT_PRODUCT_STATUS.to_string()),
            order: body.order.unwrap_or(0),
            posted_by,
            created_at: OffsetDateTime::now_utc(),
        })
        .await
        .map_err(AppError::storage("Failed to create product"))?;

    info!(product.id = %product.id, product.slug = %product.slug, by = %identity.id, "product created");
    Ok(HttpResponse::Created().json(DataResponse::new(ProductView::from(product))))
}

/// Public listing; the caller's identity, when present, only feeds the logs.
async fn list_products(
    viewer: MaybeIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let listing = app_state
        .require_store()?
        .list_products_with_poster()
        .await
        .map_err(AppError::storage("Failed to fetch products"))?;

    tracing::debug!(
        count = listing.len(),
        viewer = viewer.0.as_ref().map(|c| c.id.as_str()).unwrap_or("anonymous"),
        "products listed"
    );
    let data: Vec<ProductView<Option<UserView>>> =
        listing.into_iter().map(ProductView::from).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(data)))
}

async fn update_product(
    id: ProductId,
    body: ValidatedJson<UpdateProductRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let update = body.into_inner().into_update(OffsetDateTime::now_utc());
    let product = app_state
        .require_store()?
        .update_product(id.0, update)
        .await
        .map_err(AppError::storage("Failed to update product"))?
        .ok_or_else(product_not_found)?;

    Ok(HttpResponse::Ok().json(DataResponse::new(ProductView::from(product))))
}

async fn delete_product(
    id: ProductId,
    identity: Identity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deleted = app_state
        .require_store()?
        .delete_product(id.0)
        .await
        .map_err(AppError::storage("Failed to delete product"))?;
    if !deleted {
        return Err(product_not_found());
    }

    info!(product.id = %id.0, by = %identity.id, "product deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Product deleted successfully")))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(ADMIN_ONLY.apply(web::post().to(create_product)))
            .route(GuardChain::optional().apply(web::get().to(list_products))),
    )
    .service(
        web::resource("/{id}")
            .route(ADMIN_ONLY.apply(web::put().to(update_product)))
            .route(ADMIN_ONLY.apply(web::delete().to(delete_product))),
    );
}
