use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{Order, OrderStatus, Product, ProductUpdate, Review, User};

use super::{Storage, StoreError, StoreResult};

// ============================================================================
// Postgres Store
// ============================================================================
//
// BIGSERIAL primary keys give the per-entity monotonic ids; money columns are
// NUMERIC and decoded straight into rust_decimal. Single-statement writes
// only, so each operation rides on Postgres statement atomicity.
//
// ============================================================================

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGSERIAL PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    password      TEXT NOT NULL,
    role          TEXT NOT NULL,
    name          TEXT NOT NULL,
    phone         TEXT NOT NULL,
    address       TEXT NOT NULL,
    business_name TEXT,
    latitude      DOUBLE PRECISION,
    longitude     DOUBLE PRECISION
);

CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    seller_id   BIGINT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    price       NUMERIC NOT NULL,
    unit        TEXT NOT NULL,
    kind        TEXT NOT NULL,
    available   BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE TABLE IF NOT EXISTS orders (
    id                         BIGSERIAL PRIMARY KEY,
    user_id                    BIGINT NOT NULL,
    seller_id                  BIGINT NOT NULL,
    product_id                 BIGINT NOT NULL,
    quantity                   NUMERIC NOT NULL,
    total_amount               NUMERIC NOT NULL,
    delivery_address           TEXT NOT NULL,
    delivery_latitude          DOUBLE PRECISION NOT NULL,
    delivery_longitude         DOUBLE PRECISION NOT NULL,
    status                     TEXT NOT NULL,
    created_at                 TIMESTAMPTZ NOT NULL,
    estimated_delivery_seconds BIGINT
);

CREATE TABLE IF NOT EXISTS reviews (
    id         BIGSERIAL PRIMARY KEY,
    user_id    BIGINT NOT NULL,
    seller_id  BIGINT NOT NULL,
    rating     INTEGER NOT NULL,
    comment    TEXT,
    created_at TIMESTAMPTZ NOT NULL
);
"#;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and apply the schema. Called once at startup.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

fn parse<T: std::str::FromStr<Err = String>>(value: &str) -> Result<T, StoreError> {
    value.parse().map_err(StoreError::Corrupt)
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password: row.try_get("password")?,
        role: parse(row.try_get::<&str, _>("role")?)?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        business_name: row.try_get("business_name")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
    })
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    Ok(Product {
        id: row.try_get("id")?,
        seller_id: row.try_get("seller_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        unit: row.try_get("unit")?,
        kind: parse(row.try_get::<&str, _>("kind")?)?,
        available: row.try_get("available")?,
    })
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    Ok(Order {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        seller_id: row.try_get("seller_id")?,
        product_id: row.try_get("product_id")?,
        quantity: row.try_get("quantity")?,
        total_amount: row.try_get("total_amount")?,
        delivery_address: row.try_get("delivery_address")?,
        delivery_latitude: row.try_get("delivery_latitude")?,
        delivery_longitude: row.try_get("delivery_longitude")?,
        status: parse(row.try_get::<&str, _>("status")?)?,
        created_at: row.try_get("created_at")?,
        estimated_delivery_seconds: row.try_get("estimated_delivery_seconds")?,
    })
}

fn review_from_row(row: &PgRow) -> Result<Review, StoreError> {
    Ok(Review {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        seller_id: row.try_get("seller_id")?,
        rating: row.try_get("rating")?,
        comment: row.try_get("comment")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl Storage for PgStore {
    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let row = sqlx::query(
            "INSERT INTO users \
             (username, password, role, name, phone, address, business_name, latitude, longitude) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.business_name)
        .bind(user.latitude)
        .bind(user.longitude)
        .fetch_one(&self.pool)
        .await?;
        user_from_row(&row)
    }

    async fn get_sellers(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users WHERE role = 'seller' ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn get_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query("SELECT * FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(product_from_row).collect()
    }

    async fn get_product(&self, id: i64) -> StoreResult<Option<Product>> {
        let row = sqlx::query("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn create_product(&self, product: Product) -> StoreResult<Product> {
        let row = sqlx::query(
            "INSERT INTO products (seller_id, name, description, price, unit, kind, available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(product.seller_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.unit)
        .bind(product.kind.as_str())
        .bind(product.available)
        .fetch_one(&self.pool)
        .await?;
        product_from_row(&row)
    }

    async fn update_product(
        &self,
        id: i64,
        update: ProductUpdate,
    ) -> StoreResult<Option<Product>> {
        let row = sqlx::query(
            "UPDATE products SET \
             name = COALESCE($2, name), \
             description = COALESCE($3, description), \
             price = COALESCE($4, price), \
             unit = COALESCE($5, unit), \
             kind = COALESCE($6, kind), \
             available = COALESCE($7, available) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.name)
        .bind(update.description)
        .bind(update.price)
        .bind(update.unit)
        .bind(update.kind.map(|k| k.as_str().to_string()))
        .bind(update.available)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn create_order(&self, order: Order) -> StoreResult<Order> {
        let row = sqlx::query(
            "INSERT INTO orders \
             (user_id, seller_id, product_id, quantity, total_amount, delivery_address, \
              delivery_latitude, delivery_longitude, status, created_at, estimated_delivery_seconds) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(order.user_id)
        .bind(order.seller_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.total_amount)
        .bind(&order.delivery_address)
        .bind(order.delivery_latitude)
        .bind(order.delivery_longitude)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.estimated_delivery_seconds)
        .fetch_one(&self.pool)
        .await?;
        order_from_row(&row)
    }

    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>> {
        let row = sqlx::query("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn get_orders_by_user(&self, user_id: i64) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query("SELECT * FROM orders WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(order_from_row).collect()
    }

    async fn get_orders_by_seller(&self, seller_id: i64) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query("SELECT * FROM orders WHERE seller_id = $1 ORDER BY id")
            .bind(seller_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(order_from_row).collect()
    }

    async fn set_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> StoreResult<Option<Order>> {
        let row = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn create_review(&self, review: Review) -> StoreResult<Review> {
        let row = sqlx::query(
            "INSERT INTO reviews (user_id, seller_id, rating, comment, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(review.user_id)
        .bind(review.seller_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await?;
        review_from_row(&row)
    }

    async fn get_reviews_by_seller(&self, seller_id: i64) -> StoreResult<Vec<Review>> {
        let rows = sqlx::query("SELECT * FROM reviews WHERE seller_id = $1 ORDER BY id")
            .bind(seller_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(review_from_row).collect()
    }
}
