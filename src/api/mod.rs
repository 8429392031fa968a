use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use prometheus::{Encoder, TextEncoder};

use crate::metrics::Metrics;
use crate::orders::OrderService;
use crate::store::Storage;

mod auth;
mod error;
mod orders;
mod products;
mod sellers;

pub use auth::Sessions;
pub use error::ApiError;

// ============================================================================
// HTTP API Layer
// ============================================================================
//
// Thin handlers: decode the request, authenticate, authorize by role or
// ownership, delegate to the order service or the store, map errors to
// status codes. No business rules live here.
//
// ============================================================================

/// Shared per-process state, constructed once in `main` and handed to every
/// handler by reference. No ambient singletons.
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub orders: OrderService,
    pub sessions: Sessions,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, metrics: Metrics) -> Self {
        Self {
            orders: OrderService::new(store.clone()),
            sessions: Sessions::new(),
            store,
            metrics,
        }
    }
}

/// Mount every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/user", web::get().to(auth::current_user))
            .route("/products", web::get().to(products::list))
            .route("/products", web::post().to(products::create))
            .route("/products/{id}", web::patch().to(products::update))
            .route("/sellers", web::get().to(sellers::list))
            .route("/sellers/nearby", web::get().to(sellers::nearby))
            .route("/sellers/{id}/reviews", web::post().to(sellers::create_review))
            .route("/sellers/{id}/reviews", web::get().to(sellers::list_reviews))
            .route("/orders", web::post().to(orders::create))
            .route("/orders", web::get().to(orders::list))
            .route("/orders/{id}/status", web::patch().to(orders::update_status)),
    )
    .route("/health", web::get().to(health))
    .route("/metrics", web::get().to(metrics_text));
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "fuelbunk"
    }))
}

async fn metrics_text(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&state.metrics.registry().gather(), &mut buffer)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}
