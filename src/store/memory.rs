use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{Order, OrderStatus, Product, ProductUpdate, Review, Role, User};

use super::{Storage, StoreResult};

// ============================================================================
// In-Memory Store
// ============================================================================
//
// HashMap tables behind one RwLock, with a monotonically increasing id
// counter per entity type (starting at 1). The lock is held only for the
// duration of a single operation, which gives the same read-after-write
// behavior as the Postgres store.
//
// ============================================================================

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    products: HashMap<i64, Product>,
    orders: HashMap<i64, Order>,
    reviews: HashMap<i64, Review>,
    next_user_id: i64,
    next_product_id: i64,
    next_order_id: i64,
    next_review_id: i64,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        // Lock poisoning only happens if another operation panicked while
        // writing; at that point the process state is unrecoverable anyway.
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_id<T: Clone>(items: impl Iterator<Item = T>, id: impl Fn(&T) -> i64) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.sort_by_key(|item| id(item));
    out
}

#[async_trait]
impl Storage for MemoryStore {
    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, mut user: User) -> StoreResult<User> {
        let mut tables = self.write();
        tables.next_user_id += 1;
        user.id = tables.next_user_id;
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_sellers(&self) -> StoreResult<Vec<User>> {
        Ok(sorted_by_id(
            self.read()
                .users
                .values()
                .filter(|u| u.role == Role::Seller)
                .cloned(),
            |u| u.id,
        ))
    }

    async fn get_products(&self) -> StoreResult<Vec<Product>> {
        Ok(sorted_by_id(self.read().products.values().cloned(), |p| p.id))
    }

    async fn get_product(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.read().products.get(&id).cloned())
    }

    async fn create_product(&self, mut product: Product) -> StoreResult<Product> {
        let mut tables = self.write();
        tables.next_product_id += 1;
        product.id = tables.next_product_id;
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i64,
        update: ProductUpdate,
    ) -> StoreResult<Option<Product>> {
        let mut tables = self.write();
        Ok(tables.products.get_mut(&id).map(|product| {
            product.apply(update);
            product.clone()
        }))
    }

    async fn create_order(&self, mut order: Order) -> StoreResult<Order> {
        let mut tables = self.write();
        tables.next_order_id += 1;
        order.id = tables.next_order_id;
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>> {
        Ok(self.read().orders.get(&id).cloned())
    }

    async fn get_orders_by_user(&self, user_id: i64) -> StoreResult<Vec<Order>> {
        Ok(sorted_by_id(
            self.read()
                .orders
                .values()
                .filter(|o| o.user_id == user_id)
                .cloned(),
            |o| o.id,
        ))
    }

    async fn get_orders_by_seller(&self, seller_id: i64) -> StoreResult<Vec<Order>> {
        Ok(sorted_by_id(
            self.read()
                .orders
                .values()
                .filter(|o| o.seller_id == seller_id)
                .cloned(),
            |o| o.id,
        ))
    }

    async fn set_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>> {
        let mut tables = self.write();
        Ok(tables.orders.get_mut(&id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }

    async fn create_review(&self, mut review: Review) -> StoreResult<Review> {
        let mut tables = self.write();
        tables.next_review_id += 1;
        review.id = tables.next_review_id;
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn get_reviews_by_seller(&self, seller_id: i64) -> StoreResult<Vec<Review>> {
        Ok(sorted_by_id(
            self.read()
                .reviews
                .values()
                .filter(|r| r.seller_id == seller_id)
                .cloned(),
            |r| r.id,
        ))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
