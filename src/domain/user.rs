use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

// ============================================================================
// User Entity
// ============================================================================

/// Account role. Immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Seller,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted digest, never the raw password.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub name: String,
    pub phone: String,
    pub address: String,
    // Seller-only profile fields.
    pub business_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl User {
    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }

    /// Registered station location, if the seller provided one.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

/// Registration payload. `password` arrives raw and is hashed before storage.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub business_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn default_role() -> Role {
    Role::User
}
