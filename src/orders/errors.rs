use rust_decimal::Decimal;

use crate::domain::OrderStatus;
use crate::store::StoreError;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("product {0} not found")]
    ProductNotFound(i64),

    #[error("seller {0} not found")]
    SellerNotFound(i64),

    #[error("order {0} not found")]
    OrderNotFound(i64),

    #[error("order quantity must be positive, got {0}")]
    InvalidQuantity(Decimal),

    #[error("cannot move order from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("only the seller fulfilling the order may change its status")]
    NotOrderSeller,

    #[error(transparent)]
    Store(#[from] StoreError),
}
