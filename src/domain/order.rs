use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Entity & Status Machine
// ============================================================================

/// Order delivery status.
///
/// The chain is strictly one-way with no skips:
///
/// ```text
/// [placed] --accepted--> [accepted] --delivered--> [delivered]
/// ```
///
/// `Placed` is the sole initial state, `Delivered` is terminal, and there is
/// no cancellation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Accepted,
    Delivered,
}

impl OrderStatus {
    /// The only legal successor of this status, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Accepted),
            OrderStatus::Accepted => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Whether advancing from `self` to `target` is a legal transition.
    pub fn can_advance_to(self, target: OrderStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placed" => Ok(OrderStatus::Placed),
            "accepted" => Ok(OrderStatus::Accepted),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub seller_id: i64,
    pub product_id: i64,
    pub quantity: Decimal,
    /// `quantity * price` captured at order time; not re-derived later.
    pub total_amount: Decimal,
    pub delivery_address: String,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// ETA in seconds; absent when the seller has no registered location.
    pub estimated_delivery_seconds: Option<i64>,
}

/// Buyer-supplied order payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub product_id: i64,
    pub quantity: Decimal,
    pub delivery_address: String,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_chain_is_one_way() {
        assert_eq!(OrderStatus::Placed.next(), Some(OrderStatus::Accepted));
        assert_eq!(OrderStatus::Accepted.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn skipping_and_regressing_are_illegal() {
        assert!(OrderStatus::Placed.can_advance_to(OrderStatus::Accepted));
        assert!(OrderStatus::Accepted.can_advance_to(OrderStatus::Delivered));

        // Skip.
        assert!(!OrderStatus::Placed.can_advance_to(OrderStatus::Delivered));
        // Same state.
        assert!(!OrderStatus::Placed.can_advance_to(OrderStatus::Placed));
        assert!(!OrderStatus::Accepted.can_advance_to(OrderStatus::Accepted));
        // Regress.
        assert!(!OrderStatus::Accepted.can_advance_to(OrderStatus::Placed));
        assert!(!OrderStatus::Delivered.can_advance_to(OrderStatus::Accepted));
        assert!(!OrderStatus::Delivered.can_advance_to(OrderStatus::Placed));
    }

    #[test]
    fn status_wire_format_matches_api() {
        assert_eq!(serde_json::to_string(&OrderStatus::Placed).unwrap(), "\"placed\"");
        let parsed: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }
}
