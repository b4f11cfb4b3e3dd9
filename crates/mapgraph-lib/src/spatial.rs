//! Secondary coordinate index over a finalized graph.
//!
//! Point identity stays identifier-based everywhere; this index answers the
//! coordinate-shaped questions ("which point is closest to here", "does any
//! point sit exactly here") without overloading point equality.
//!
//! The KD-tree stores positions on the unit sphere. Chord length grows
//! monotonically with central angle, so the nearest point by squared
//! Euclidean distance in the tree is also the nearest by great-circle
//! distance; reported distances are recomputed with the haversine function
//! shared by the rest of the library.

use std::collections::HashMap;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::graph::Graph;
use crate::model::{haversine, Point, PointId};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// A point returned by a proximity query, with its great-circle distance in
/// meters from the queried coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyPoint {
    pub id: PointId,
    pub distance: f64,
}

/// Spatial index for nearest-point and exact-coordinate queries.
pub struct SpatialIndex {
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    points: Vec<Point>,
    by_coordinates: HashMap<(u64, u64), Vec<PointId>>,
}

impl SpatialIndex {
    /// Build an index over every point of a finalized graph.
    pub fn build(graph: &Graph) -> Self {
        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        let mut points = Vec::with_capacity(graph.len());
        let mut by_coordinates: HashMap<(u64, u64), Vec<PointId>> = HashMap::new();

        for &point in graph.points() {
            let index = points.len();
            tree.add(&unit_vector(point.lat, point.lon), index);
            by_coordinates
                .entry(coordinate_key(point.lat, point.lon))
                .or_default()
                .push(point.id);
            points.push(point);
        }

        for ids in by_coordinates.values_mut() {
            ids.sort_unstable();
        }

        debug!(points = points.len(), "built spatial index");
        Self {
            tree,
            points,
            by_coordinates,
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point closest to the given coordinates, if the index is non-empty.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<NearbyPoint> {
        if self.points.is_empty() {
            return None;
        }

        let query = unit_vector(lat, lon);
        let neighbour = self.tree.nearest_one::<SquaredEuclidean>(&query);
        let point = self.points[neighbour.item];
        Some(NearbyPoint {
            id: point.id,
            distance: haversine(lat, lon, point.lat, point.lon),
        })
    }

    /// Up to `k` points closest to the given coordinates, nearest first.
    pub fn nearest_n(&self, lat: f64, lon: f64, k: usize) -> Vec<NearbyPoint> {
        if k == 0 || self.points.is_empty() {
            return Vec::new();
        }

        let query = unit_vector(lat, lon);
        self.tree
            .nearest_n::<SquaredEuclidean>(&query, k)
            .into_iter()
            .map(|neighbour| {
                let point = self.points[neighbour.item];
                NearbyPoint {
                    id: point.id,
                    distance: haversine(lat, lon, point.lat, point.lon),
                }
            })
            .collect()
    }

    /// Identifiers of all points at exactly the given coordinates.
    ///
    /// Exact means coordinate values compare equal; distinct points sharing
    /// one location are all returned, in identifier order.
    pub fn points_at(&self, lat: f64, lon: f64) -> &[PointId] {
        self.by_coordinates
            .get(&coordinate_key(lat, lon))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn coordinate_key(lat: f64, lon: f64) -> (u64, u64) {
    (lat.to_bits(), lon.to_bits())
}

fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let lat = lat.to_radians();
    let lon = lon.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}
