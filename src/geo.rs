use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }

    /// Great-circle distance to another point in kilometers
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Great-circle distance in kilometers between two points given in decimal
/// degrees, using the haversine formula.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push `a` slightly above 1 for antipodal points
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();
    c * EARTH_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero() {
        let d = haversine_distance(-23.4356, -46.4731, -23.4356, -46.4731);
        assert!(d.abs() < 1e-6, "d={}", d);
    }

    #[test]
    fn symmetric() {
        let gru = Coordinate::new(-23.4356, -46.4731);
        let mia = Coordinate::new(25.7959, -80.2870);
        let there = gru.distance_to(&mia);
        let back = mia.distance_to(&gru);
        assert!((there - back).abs() < 1e-9);
        // GRU-MIA is roughly 6,550 km
        assert!((there - 6550.0).abs() < 50.0, "there={}", there);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 1e-6, "d={}", d);
        assert!(d.is_finite());
    }
}
