// ============================================================================
// FuelBunk - fuel & oil marketplace service
// ============================================================================
//
// Buyers order fuel and oil from nearby sellers ("bunks"), sellers accept
// and deliver, buyers leave reviews. JSON HTTP API over a repository-backed
// store; business rules concentrated in the order lifecycle service.
//
// ============================================================================

pub mod api;
pub mod config;
pub mod domain;
pub mod geo;
pub mod metrics;
pub mod orders;
pub mod store;
