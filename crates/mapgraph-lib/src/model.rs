use serde::{Deserialize, Serialize};

/// Numeric identifier for a map point.
pub type PointId = i64;

/// Mean Earth radius in meters, used by the haversine distance.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two coordinate pairs, in degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

/// A located entity with a stable identifier and geographic coordinates.
///
/// Identity is the identifier alone. Two points may share coordinates while
/// remaining distinct; coordinate lookups go through the spatial index, never
/// through point equality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub id: PointId,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    /// Great-circle distance in meters to another point.
    ///
    /// The same function weighs graph edges, drives the A* heuristic, and
    /// measures itinerary legs, so comparisons stay internally consistent.
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Geographic bounding box of a map source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Whether the given coordinates fall inside the box, edges inclusive.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}
