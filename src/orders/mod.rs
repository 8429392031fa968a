// ============================================================================
// Order Lifecycle
// ============================================================================
//
// The one place business rules live: pricing at order time, delivery ETA,
// and the legality of status transitions. Handlers stay thin and call in
// here; the store stays dumb and just persists what it is given.
//
// ============================================================================

mod errors;
mod service;

pub use errors::OrderError;
pub use service::OrderService;
