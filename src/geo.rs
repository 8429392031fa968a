use serde::{Deserialize, Serialize};

// ============================================================================
// Geo-Distance Estimator
// ============================================================================
//
// Pure great-circle math used in two places:
// 1. Delivery ETA for a new order (seller location -> delivery location)
// 2. The "nearby sellers" filter (buyer location, fixed radius)
//
// ============================================================================

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Travel time assumed per kilometer, in minutes.
const MINUTES_PER_KM: f64 = 2.0;

/// Fixed order-preparation buffer added to every ETA, in seconds.
const PREPARATION_BUFFER_SECS: i64 = 600;

/// A seller is "nearby" a buyer iff within this many kilometers (inclusive).
pub const NEARBY_RADIUS_KM: f64 = 10.0;

/// A point on Earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Great-circle distance between two points, haversine formula.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Delivery ETA in seconds: 2 minutes of travel per kilometer (rounded up),
/// plus a fixed 10-minute preparation buffer.
pub fn estimate_delivery_seconds(distance_km: f64) -> i64 {
    (distance_km * MINUTES_PER_KM * 60.0).ceil() as i64 + PREPARATION_BUFFER_SECS
}

/// Whether `seller` is within the nearby radius of `buyer`.
pub fn is_nearby(buyer: Coordinates, seller: Coordinates) -> bool {
    haversine_km(buyer, seller) <= NEARBY_RADIUS_KM
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_have_zero_distance() {
        let p = Coordinates::new(12.9716, 77.5946);
        assert_eq!(haversine_km(p, p), 0.0);

        let origin = Coordinates::new(0.0, 0.0);
        assert_eq!(haversine_km(origin, origin), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(12.9716, 77.5946);
        let b = Coordinates::new(13.0827, 80.2707);
        assert_eq!(haversine_km(a, b), haversine_km(b, a));
    }

    #[test]
    fn known_distance_along_equator() {
        // One degree of longitude at the equator is ~111.19 km.
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 1.0);
        let d = haversine_km(a, b);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn eta_for_twenty_km_delivery() {
        // 0.18 degrees of longitude at the equator is ~20 km; the ETA is
        // 2 min/km => ~2400s travel plus the 600s preparation buffer.
        let seller = Coordinates::new(0.0, 0.0);
        let delivery = Coordinates::new(0.0, 0.18);
        let d = haversine_km(seller, delivery);
        assert!((d - 20.0).abs() < 0.1, "got {d}");

        let eta = estimate_delivery_seconds(d);
        assert!((eta - 3000).abs() <= 5, "got {eta}");
    }

    #[test]
    fn eta_rounds_travel_time_up() {
        // 0.001 km => 0.12s of travel, which still counts as a whole second.
        assert_eq!(estimate_delivery_seconds(0.001), 601);
        assert_eq!(estimate_delivery_seconds(0.0), 600);
    }

    #[test]
    fn nearby_radius_is_inclusive() {
        let buyer = Coordinates::new(0.0, 0.0);

        // Due north along the meridian the formula degenerates to
        // radius * delta-lat, so the boundary latitude is exact (backed off
        // one part in 1e12 to stay on the inclusive side of float rounding).
        let limit_lat = (10.0 / EARTH_RADIUS_KM).to_degrees() * (1.0 - 1e-12);
        let beyond_lat = (10.01 / EARTH_RADIUS_KM).to_degrees();
        let at_limit = Coordinates::new(limit_lat, 0.0);
        let beyond = Coordinates::new(beyond_lat, 0.0);

        assert!((haversine_km(buyer, at_limit) - 10.0).abs() < 1e-6);
        assert!(is_nearby(buyer, at_limit));
        assert!(!is_nearby(buyer, beyond));
    }
}
