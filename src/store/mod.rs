use async_trait::async_trait;

use crate::domain::{Order, OrderStatus, Product, ProductUpdate, Review, User};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

// ============================================================================
// Domain Store - Repository Contract
// ============================================================================
//
// Narrow CRUD surface over the four entities. Two implementations: an
// in-memory store (tests, local runs without a database) and Postgres.
// Both must give identical read-after-write semantics for a single instance;
// there is no caching layer in between.
//
// Every `create_*` takes the entity with `id = 0` and returns it with the
// next monotonically increasing id for that entity type.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Storage: Send + Sync + 'static {
    // Users
    async fn get_user(&self, id: i64) -> StoreResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn create_user(&self, user: User) -> StoreResult<User>;
    /// All accounts with the seller role.
    async fn get_sellers(&self) -> StoreResult<Vec<User>>;

    // Products
    async fn get_products(&self) -> StoreResult<Vec<Product>>;
    async fn get_product(&self, id: i64) -> StoreResult<Option<Product>>;
    async fn create_product(&self, product: Product) -> StoreResult<Product>;
    async fn update_product(
        &self,
        id: i64,
        update: ProductUpdate,
    ) -> StoreResult<Option<Product>>;

    // Orders
    async fn create_order(&self, order: Order) -> StoreResult<Order>;
    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>>;
    async fn get_orders_by_user(&self, user_id: i64) -> StoreResult<Vec<Order>>;
    async fn get_orders_by_seller(&self, seller_id: i64) -> StoreResult<Vec<Order>>;
    async fn set_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>>;

    // Reviews
    async fn create_review(&self, review: Review) -> StoreResult<Review>;
    async fn get_reviews_by_seller(&self, seller_id: i64) -> StoreResult<Vec<Review>>;
}
