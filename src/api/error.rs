use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use crate::orders::OrderError;
use crate::store::StoreError;

// ============================================================================
// API Error Taxonomy
// ============================================================================
//
// 400 validation / illegal transition, 401 unauthenticated, 403 role or
// ownership mismatch, 404 missing referenced entity, 500 store failure.
// Every failure is surfaced directly; nothing is retried.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Label used for the failure counter.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::Forbidden => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            tracing::error!(%detail, "request failed");
        }
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::ProductNotFound(_)
            | OrderError::SellerNotFound(_)
            | OrderError::OrderNotFound(_) => ApiError::NotFound(e.to_string()),
            // An illegal transition is a bad request, not a server fault.
            OrderError::InvalidTransition { .. } | OrderError::InvalidQuantity(_) => {
                ApiError::Validation(e.to_string())
            }
            OrderError::NotOrderSeller => ApiError::Forbidden,
            OrderError::Store(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use actix_web::ResponseError;

    #[test]
    fn status_mapping_matches_the_contract() {
        assert_eq!(
            ApiError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn illegal_transition_is_a_bad_request_not_a_500() {
        let err: ApiError = OrderError::InvalidTransition {
            from: OrderStatus::Placed,
            to: OrderStatus::Delivered,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_entities_map_to_404() {
        let err: ApiError = OrderError::ProductNotFound(7).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = OrderError::NotOrderSeller.into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
