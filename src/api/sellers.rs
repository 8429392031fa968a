use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::domain::{NewReview, Review};
use crate::geo::Coordinates;

use super::auth::authenticate;
use super::{ApiError, AppState};

// ============================================================================
// Seller & Review Handlers
// ============================================================================

pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let sellers = state.store.get_sellers().await?;
    Ok(HttpResponse::Ok().json(sellers))
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Sellers within the delivery radius of the caller's position.
pub async fn nearby(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> Result<HttpResponse, ApiError> {
    let sellers = state
        .orders
        .nearby_sellers(Coordinates::new(query.lat, query.lng))
        .await?;
    Ok(HttpResponse::Ok().json(sellers))
}

pub async fn create_review(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<NewReview>,
) -> Result<HttpResponse, ApiError> {
    let user = authenticate(&req, &state).await?;

    let seller_id = path.into_inner();
    let seller = state
        .store
        .get_user(seller_id)
        .await?
        .filter(|u| u.is_seller())
        .ok_or_else(|| ApiError::NotFound(format!("seller {seller_id} not found")))?;

    let new = body.into_inner();
    if !new.rating_in_range() {
        return Err(ApiError::Validation("rating must be between 1 and 5".into()));
    }

    let review = state
        .store
        .create_review(Review {
            id: 0,
            user_id: user.id,
            seller_id: seller.id,
            rating: new.rating,
            comment: new.comment,
            created_at: Utc::now(),
        })
        .await?;

    state.metrics.reviews_created.inc();
    Ok(HttpResponse::Created().json(review))
}

pub async fn list_reviews(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let reviews = state.store.get_reviews_by_seller(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}
