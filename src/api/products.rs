use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;

use crate::domain::{NewProduct, Product, ProductUpdate};

use super::auth::authenticate;
use super::{ApiError, AppState};

// ============================================================================
// Product Handlers
// ============================================================================

pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let products = state.store.get_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<NewProduct>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &state).await?;
    if !user.is_seller() {
        return Err(ApiError::Forbidden);
    }

    let new = body.into_inner();
    if new.price <= Decimal::ZERO {
        return Err(ApiError::Validation("price must be positive".into()));
    }
    if new.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".into()));
    }

    let product = state
        .store
        .create_product(Product {
            id: 0,
            seller_id: user.id,
            name: new.name,
            description: new.description,
            price: new.price,
            unit: new.unit,
            kind: new.kind,
            available: new.available,
        })
        .await?;

    state.metrics.products_created.inc();
    Ok(HttpResponse::Created().json(product))
}

pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &state).await?;
    if !user.is_seller() {
        return Err(ApiError::Forbidden);
    }

    let id = path.into_inner();
    let product = state
        .store
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;

    if product.seller_id != user.id {
        return Err(ApiError::Forbidden);
    }

    let update = body.into_inner();
    if update.price.is_some_and(|p| p <= Decimal::ZERO) {
        return Err(ApiError::Validation("price must be positive".into()));
    }

    let updated = state
        .store
        .update_product(id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;

    Ok(HttpResponse::Ok().json(updated))
}
