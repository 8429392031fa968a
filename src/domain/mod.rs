// ============================================================================
// Domain Layer - Entities & Value Objects
// ============================================================================
//
// The four persisted entities of the marketplace, plus their value objects
// (roles, product kinds, the order status machine). Business rules that span
// entities live in the orders service, not here.
//
// ============================================================================

pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use order::{NewOrder, Order, OrderStatus};
pub use product::{NewProduct, Product, ProductKind, ProductUpdate};
pub use review::{NewReview, Review};
pub use user::{NewUser, Role, User};
