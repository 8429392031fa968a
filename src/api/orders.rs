use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::domain::{NewOrder, OrderStatus};

use super::auth::authenticate;
use super::{ApiError, AppState};

// ============================================================================
// Order Handlers
// ============================================================================

pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<NewOrder>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &state).await?;

    let order = state
        .orders
        .create_order(user.id, body.into_inner())
        .await
        .map_err(|e| {
            let api: ApiError = e.into();
            state.metrics.record_failure(api.kind());
            api
        })?;

    state.metrics.orders_placed.inc();
    Ok(HttpResponse::Created().json(order))
}

/// Sellers see orders they fulfil; everyone else sees orders they placed.
pub async fn list(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &state).await?;

    let orders = if user.is_seller() {
        state.store.get_orders_by_seller(user.id).await?
    } else {
        state.store.get_orders_by_user(user.id).await?
    };

    Ok(HttpResponse::Ok().json(orders))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

pub async fn update_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &state).await?;
    if !user.is_seller() {
        return Err(ApiError::Forbidden);
    }

    let target = body.status;
    let order = state
        .orders
        .update_status(path.into_inner(), target, user.id)
        .await
        .map_err(|e| {
            let api: ApiError = e.into();
            state.metrics.record_failure(api.kind());
            api
        })?;

    state.metrics.record_transition(target.as_str());
    Ok(HttpResponse::Ok().json(order))
}
