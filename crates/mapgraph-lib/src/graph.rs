//! Conversion of raw map records into a finalized, query-ready graph.

use std::collections::{BTreeMap, HashMap};
use std::mem;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{Bounds, Point, PointId};
use crate::parser::{MapParser, RawPoint, RawWay};

/// Finalized identifier-to-point mapping with adjacency, ready for querying.
///
/// Built once and thereafter immutable; the adjacency table sits behind an
/// `Arc` so clones of the graph share it. Adjacency is expressed as
/// identifier lists rather than owning references between points, which
/// keeps the structure cycle-free for consumers that encode it.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    points: HashMap<PointId, Point>,
    adjacency: Arc<HashMap<PointId, Vec<PointId>>>,
}

impl Graph {
    /// Look up a point by identifier.
    pub fn point(&self, id: PointId) -> Option<Point> {
        self.points.get(&id).copied()
    }

    /// Whether the graph contains the given identifier.
    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains_key(&id)
    }

    /// Identifiers directly adjacent to the given point.
    ///
    /// Returns an empty slice for isolated points and for identifiers absent
    /// from the graph.
    pub fn neighbours(&self, id: PointId) -> &[PointId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over all points in the graph.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    /// Number of points in the graph.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the graph holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of undirected edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Stable, reference-identity-preserving view for encoding.
    ///
    /// Every point appears exactly once, keyed by identifier; edges are
    /// expressed as identifier lists back into the same mapping, so encoders
    /// never recurse through cycles.
    pub fn export(&self) -> GraphExport {
        let points = self
            .points
            .values()
            .map(|point| {
                (
                    point.id,
                    ExportedPoint {
                        lat: point.lat,
                        lon: point.lon,
                        edges: self.neighbours(point.id).to_vec(),
                    },
                )
            })
            .collect();
        GraphExport { points }
    }
}

/// Serializable snapshot of a finalized graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphExport {
    pub points: BTreeMap<PointId, ExportedPoint>,
}

/// One point within a [`GraphExport`], with adjacency as identifier lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedPoint {
    pub lat: f64,
    pub lon: f64,
    pub edges: Vec<PointId>,
}

/// One-shot converter from raw records to a finalized [`Graph`].
#[derive(Debug)]
pub struct GraphBuilder {
    points: Vec<RawPoint>,
    ways: Vec<RawWay>,
    graph: Option<Graph>,
}

impl GraphBuilder {
    /// Create a builder owning the raw records of a completed parse session.
    pub fn new(points: Vec<RawPoint>, ways: Vec<RawWay>) -> Self {
        Self {
            points,
            ways,
            graph: None,
        }
    }

    /// Convert the raw records into the finalized graph.
    ///
    /// Every consecutive identifier pair in every way registers a
    /// bidirectional edge; duplicate registrations collapse in the adjacency
    /// lists. Way references to unknown identifiers are skipped and counted
    /// rather than failing the whole build. Points never referenced by a way
    /// stay in the graph with empty adjacency.
    ///
    /// The raw records are consumed; a second call fails with
    /// [`Error::AlreadyBuilt`].
    pub fn build(&mut self) -> Result<()> {
        if self.graph.is_some() {
            return Err(Error::AlreadyBuilt);
        }

        let mut points = HashMap::new();
        for raw in mem::take(&mut self.points) {
            points.insert(
                raw.id,
                Point {
                    id: raw.id,
                    lat: raw.lat,
                    lon: raw.lon,
                },
            );
        }

        let mut adjacency: HashMap<PointId, Vec<PointId>> = HashMap::new();
        let mut skipped_edges = 0usize;
        for way in mem::take(&mut self.ways) {
            for pair in way.points.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                if !points.contains_key(&from) || !points.contains_key(&to) {
                    skipped_edges += 1;
                    continue;
                }
                adjacency.entry(from).or_default().push(to);
                adjacency.entry(to).or_default().push(from);
            }
        }

        for neighbours in adjacency.values_mut() {
            neighbours.sort_unstable();
            neighbours.dedup();
        }

        if skipped_edges > 0 {
            warn!(skipped_edges, "ignored way segments referencing unknown points");
        }

        info!(
            points = points.len(),
            edges = adjacency.values().map(Vec::len).sum::<usize>() / 2,
            "built graph"
        );

        self.graph = Some(Graph {
            points,
            adjacency: Arc::new(adjacency),
        });
        Ok(())
    }

    /// The finalized graph, after a successful [`build`](Self::build).
    pub fn graph(&self) -> Result<&Graph> {
        self.graph.as_ref().ok_or(Error::NotYetBuilt)
    }

    /// Consume the builder, yielding the finalized graph.
    pub fn into_graph(self) -> Result<Graph> {
        self.graph.ok_or(Error::NotYetBuilt)
    }
}

/// Run the full load protocol against a map source on disk.
///
/// Opens the source, reads bounds, points, and ways in order, and builds the
/// finalized graph.
pub fn load_map(path: &Path) -> Result<(Bounds, Graph)> {
    let mut parser = MapParser::open(path)?;
    parser.read_bounds()?;
    parser.read_points()?;
    parser.read_ways()?;
    let (bounds, points, ways) = parser.into_records()?;

    let mut builder = GraphBuilder::new(points, ways);
    builder.build()?;
    Ok((bounds, builder.into_graph()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_point(id: PointId, lat: f64, lon: f64) -> RawPoint {
        RawPoint { id, lat, lon }
    }

    #[test]
    fn duplicate_way_segments_collapse() {
        let points = vec![raw_point(1, 0.0, 0.0), raw_point(2, 0.0, 1.0)];
        let ways = vec![
            RawWay { points: vec![1, 2] },
            RawWay { points: vec![2, 1] },
        ];
        let mut builder = GraphBuilder::new(points, ways);
        builder.build().unwrap();

        let graph = builder.graph().unwrap();
        assert_eq!(graph.neighbours(1), &[2]);
        assert_eq!(graph.neighbours(2), &[1]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn export_lists_every_point_once() {
        let points = vec![
            raw_point(1, 0.0, 0.0),
            raw_point(2, 0.0, 1.0),
            raw_point(3, 1.0, 1.0),
        ];
        let ways = vec![RawWay {
            points: vec![1, 2, 3, 1],
        }];
        let mut builder = GraphBuilder::new(points, ways);
        builder.build().unwrap();

        let export = builder.graph().unwrap().export();
        assert_eq!(export.points.len(), 3);
        assert_eq!(export.points[&1].edges, vec![2, 3]);
    }
}
