use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Review Entity (append-only)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub seller_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub rating: i32,
    pub comment: Option<String>,
}

impl NewReview {
    /// Ratings are a 1-5 star scale.
    pub fn rating_in_range(&self) -> bool {
        (1..=5).contains(&self.rating)
    }
}
