use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Product Entity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Fuel,
    Oil,
}

impl ProductKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductKind::Fuel => "fuel",
            ProductKind::Oil => "oil",
        }
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fuel" => Ok(ProductKind::Fuel),
            "oil" => Ok(ProductKind::Oil),
            other => Err(format!("unknown product kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub seller_id: i64,
    pub name: String,
    pub description: String,
    /// Unit price. Decimal, never a binary float: this is money.
    pub price: Decimal,
    /// Sale unit, e.g. "litre".
    pub unit: String,
    pub kind: ProductKind,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub unit: String,
    pub kind: ProductKind,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Partial update; only the owning seller may apply one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub unit: Option<String>,
    pub kind: Option<ProductKind>,
    pub available: Option<bool>,
}

impl Product {
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn partial_update_leaves_other_fields_alone() {
        let mut product = Product {
            id: 1,
            seller_id: 7,
            name: "Diesel".into(),
            description: "High-speed diesel".into(),
            price: Decimal::from_str("92.50").unwrap(),
            unit: "litre".into(),
            kind: ProductKind::Fuel,
            available: true,
        };

        product.apply(ProductUpdate {
            available: Some(false),
            price: Some(Decimal::from_str("94.00").unwrap()),
            ..Default::default()
        });

        assert!(!product.available);
        assert_eq!(product.price, Decimal::from_str("94.00").unwrap());
        assert_eq!(product.name, "Diesel");
        assert_eq!(product.kind, ProductKind::Fuel);
    }

    #[test]
    fn kind_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&ProductKind::Fuel).unwrap(), "\"fuel\"");
        let parsed: ProductKind = serde_json::from_str("\"oil\"").unwrap();
        assert_eq!(parsed, ProductKind::Oil);
    }
}
