use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{NewOrder, Order, OrderStatus, User};
use crate::geo::{self, Coordinates};
use crate::store::Storage;

use super::OrderError;

// ============================================================================
// Order Service
// ============================================================================

pub struct OrderService {
    store: Arc<dyn Storage>,
}

impl OrderService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Place an order: price it from the product's current price, estimate
    /// delivery from the seller's registered location, persist it as `Placed`.
    ///
    /// All validation happens before the single durable write, so a failed
    /// creation leaves no partial order behind.
    pub async fn create_order(&self, buyer_id: i64, new: NewOrder) -> Result<Order, OrderError> {
        if new.quantity <= Decimal::ZERO {
            return Err(OrderError::InvalidQuantity(new.quantity));
        }

        let product = self
            .store
            .get_product(new.product_id)
            .await?
            .ok_or(OrderError::ProductNotFound(new.product_id))?;

        let seller = self
            .store
            .get_user(product.seller_id)
            .await?
            .ok_or(OrderError::SellerNotFound(product.seller_id))?;

        // Price captured at order time; later product edits do not touch it.
        let total_amount = new.quantity * product.price;

        let delivery = Coordinates::new(new.delivery_latitude, new.delivery_longitude);
        let estimated_delivery_seconds = seller
            .coordinates()
            .map(|bunk| geo::estimate_delivery_seconds(geo::haversine_km(bunk, delivery)));

        let order = self
            .store
            .create_order(Order {
                id: 0,
                user_id: buyer_id,
                seller_id: seller.id,
                product_id: product.id,
                quantity: new.quantity,
                total_amount,
                delivery_address: new.delivery_address,
                delivery_latitude: new.delivery_latitude,
                delivery_longitude: new.delivery_longitude,
                status: OrderStatus::Placed,
                created_at: Utc::now(),
                estimated_delivery_seconds,
            })
            .await?;

        tracing::info!(
            order_id = order.id,
            buyer_id,
            seller_id = order.seller_id,
            total = %order.total_amount,
            eta_secs = ?order.estimated_delivery_seconds,
            "order placed"
        );

        Ok(order)
    }

    /// Advance an order along `placed -> accepted -> delivered`.
    ///
    /// Legality is checked against the status read in this call, immediately
    /// before the write; concurrent updates are last-write-wins.
    pub async fn update_status(
        &self,
        order_id: i64,
        target: OrderStatus,
        acting_seller_id: i64,
    ) -> Result<Order, OrderError> {
        let order = self
            .store
            .get_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if order.seller_id != acting_seller_id {
            return Err(OrderError::NotOrderSeller);
        }

        if !order.status.can_advance_to(target) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: target,
            });
        }

        let updated = self
            .store
            .set_order_status(order_id, target)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        tracing::info!(order_id, status = target.as_str(), "order status advanced");

        Ok(updated)
    }

    /// Sellers within the nearby radius of the given point. Sellers with no
    /// registered location are never considered reachable.
    pub async fn nearby_sellers(&self, point: Coordinates) -> Result<Vec<User>, OrderError> {
        let sellers = self.store.get_sellers().await?;
        Ok(sellers
            .into_iter()
            .filter(|seller| {
                seller
                    .coordinates()
                    .is_some_and(|bunk| geo::is_nearby(point, bunk))
            })
            .collect())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductKind, Role};
    use crate::store::MemoryStore;
    use std::str::FromStr;

    fn service() -> (Arc<MemoryStore>, OrderService) {
        let store = Arc::new(MemoryStore::new());
        let svc = OrderService::new(store.clone());
        (store, svc)
    }

    async fn seed_seller(store: &MemoryStore, lat: Option<f64>, lng: Option<f64>) -> User {
        store
            .create_user(User {
                id: 0,
                username: "bunk".into(),
                password: "salt$digest".into(),
                role: Role::Seller,
                name: "Bunk".into(),
                phone: "9000000000".into(),
                address: "Jetty 2".into(),
                business_name: Some("Bunk Fuels".into()),
                latitude: lat,
                longitude: lng,
            })
            .await
            .unwrap()
    }

    async fn seed_product(store: &MemoryStore, seller_id: i64, price: &str) -> Product {
        store
            .create_product(Product {
                id: 0,
                seller_id,
                name: "Diesel".into(),
                description: "High-speed diesel".into(),
                price: Decimal::from_str(price).unwrap(),
                unit: "litre".into(),
                kind: ProductKind::Fuel,
                available: true,
            })
            .await
            .unwrap()
    }

    fn order_for(product_id: i64, quantity: &str) -> NewOrder {
        NewOrder {
            product_id,
            quantity: Decimal::from_str(quantity).unwrap(),
            delivery_address: "Berth 9".into(),
            delivery_latitude: 0.0,
            delivery_longitude: 0.18,
        }
    }

    #[tokio::test]
    async fn total_amount_is_decimal_exact() {
        let (store, svc) = service();
        let seller = seed_seller(&store, Some(0.0), Some(0.0)).await;
        let product = seed_product(&store, seller.id, "500.00").await;

        let order = svc.create_order(42, order_for(product.id, "3")).await.unwrap();

        assert_eq!(order.total_amount, Decimal::from_str("1500.00").unwrap());
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.user_id, 42);
        assert_eq!(order.seller_id, seller.id);
    }

    #[tokio::test]
    async fn eta_uses_seller_location() {
        let (store, svc) = service();
        let seller = seed_seller(&store, Some(0.0), Some(0.0)).await;
        let product = seed_product(&store, seller.id, "92.50").await;

        // Delivery ~20 km due east of the bunk: ~2400s travel + 600s prep.
        let order = svc.create_order(1, order_for(product.id, "2")).await.unwrap();
        let eta = order.estimated_delivery_seconds.unwrap();
        assert!((eta - 3000).abs() <= 5, "got {eta}");
    }

    #[tokio::test]
    async fn eta_absent_when_seller_has_no_location() {
        let (store, svc) = service();
        let seller = seed_seller(&store, None, None).await;
        let product = seed_product(&store, seller.id, "92.50").await;

        let order = svc.create_order(1, order_for(product.id, "2")).await.unwrap();
        assert!(order.estimated_delivery_seconds.is_none());
    }

    #[tokio::test]
    async fn missing_product_persists_nothing() {
        let (store, svc) = service();

        let err = svc.create_order(1, order_for(999, "2")).await.unwrap_err();
        assert!(matches!(err, OrderError::ProductNotFound(999)));
        assert!(store.get_orders_by_user(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let (store, svc) = service();
        let seller = seed_seller(&store, Some(0.0), Some(0.0)).await;
        let product = seed_product(&store, seller.id, "92.50").await;

        let err = svc.create_order(1, order_for(product.id, "0")).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(_)));
    }

    #[tokio::test]
    async fn status_must_advance_one_step_at_a_time() {
        let (store, svc) = service();
        let seller = seed_seller(&store, Some(0.0), Some(0.0)).await;
        let product = seed_product(&store, seller.id, "92.50").await;
        let order = svc.create_order(1, order_for(product.id, "2")).await.unwrap();

        // Skipping straight to delivered is illegal.
        let err = svc
            .update_status(order.id, OrderStatus::Delivered, seller.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Placed,
                to: OrderStatus::Delivered
            }
        ));

        // The full chain in sequence succeeds.
        let accepted = svc
            .update_status(order.id, OrderStatus::Accepted, seller.id)
            .await
            .unwrap();
        assert_eq!(accepted.status, OrderStatus::Accepted);

        let delivered = svc
            .update_status(order.id, OrderStatus::Delivered, seller.id)
            .await
            .unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);

        // Delivered is terminal.
        let err = svc
            .update_status(order.id, OrderStatus::Delivered, seller.id)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn only_the_owning_seller_may_advance() {
        let (store, svc) = service();
        let seller = seed_seller(&store, Some(0.0), Some(0.0)).await;
        let product = seed_product(&store, seller.id, "92.50").await;
        let order = svc.create_order(1, order_for(product.id, "2")).await.unwrap();

        let err = svc
            .update_status(order.id, OrderStatus::Accepted, seller.id + 100)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotOrderSeller));

        let err = svc
            .update_status(order.id + 100, OrderStatus::Accepted, seller.id)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::OrderNotFound(_)));
    }

    #[tokio::test]
    async fn nearby_excludes_far_and_unlocated_sellers() {
        let (store, svc) = service();

        // ~10.0 km north (just inside), ~10.01 km (outside), and unlocated.
        let km_to_deg = |km: f64| (km / 6371.0).to_degrees();
        let near = seed_seller(&store, Some(km_to_deg(10.0) * (1.0 - 1e-12)), Some(0.0)).await;
        store
            .create_user(User {
                username: "far".into(),
                latitude: Some(km_to_deg(10.01)),
                longitude: Some(0.0),
                ..near.clone()
            })
            .await
            .unwrap();
        store
            .create_user(User {
                username: "nowhere".into(),
                latitude: None,
                longitude: None,
                ..near.clone()
            })
            .await
            .unwrap();

        let found = svc
            .nearby_sellers(Coordinates::new(0.0, 0.0))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, near.id);
    }
}
