//! MapGraph library entry points.
//!
//! This crate turns a raw map source into a weighted road graph and answers
//! shortest-path queries against it: a staged map parser (bounds, then
//! points, then ways), a one-shot graph builder, and Dijkstra/A* search over
//! the finalized graph. Higher-level consumers (CLI, transport layers)
//! should only depend on the items exported here instead of reimplementing
//! behavior.

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod model;
pub mod output;
pub mod parser;
pub mod path;
pub mod routing;
pub mod spatial;

pub use error::{Endpoint, Error, Result};
pub use graph::{load_map, Graph, GraphBuilder, GraphExport};
pub use model::{haversine, Bounds, Point, PointId};
pub use output::{RouteRenderMode, RouteStep, RouteSummary};
pub use parser::{MapParser, RawPoint, RawWay, Section};
pub use path::{find_route_a_star, find_route_dijkstra, Path};
pub use routing::{Algorithm, PathFinder, SearchOutcome};
pub use spatial::{NearbyPoint, SpatialIndex};
