//! Query context over a finalized graph.
//!
//! [`PathFinder`] carries the graph handle, the algorithm selector, and the
//! result of the most recent query as one explicit value, so callers hold no
//! routing state of their own. One finder serves one query at a time;
//! concurrent queries use separate finders over the same shared graph.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::model::PointId;
use crate::path::{find_route_a_star, find_route_dijkstra, Path};

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Dijkstra's algorithm (plain cumulative distance).
    Dijkstra,
    /// A* search (distance plus great-circle estimate to the goal).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "a-star" | "astar" => Ok(Algorithm::AStar),
            other => Err(Error::UnknownAlgorithm {
                name: other.to_string(),
            }),
        }
    }
}

/// Outcome of a completed search.
///
/// Unreachability is a normal outcome of a successful search, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(Path),
    Unreachable,
}

impl SearchOutcome {
    /// The found path, or `None` when the goal was unreachable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Unreachable => None,
        }
    }
}

/// Reusable shortest-path engine over a shared, finalized graph.
///
/// Every query rebuilds its frontier and distance tables from scratch, so a
/// finder can serve independent queries back to back without leaking state
/// between them.
#[derive(Debug)]
pub struct PathFinder<'g> {
    graph: &'g Graph,
    outcome: Option<SearchOutcome>,
}

impl<'g> PathFinder<'g> {
    /// Create a finder over a finalized graph.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            outcome: None,
        }
    }

    /// Run one synchronous search with the selected algorithm.
    ///
    /// Fails with [`Error::UnknownPoint`] before any search work when either
    /// endpoint is absent from the graph; a failed query discards the
    /// previous result rather than leaving it observable.
    pub fn find(
        &mut self,
        algorithm: Algorithm,
        start: PointId,
        goal: PointId,
    ) -> Result<&SearchOutcome> {
        self.outcome = None;
        let found = match algorithm {
            Algorithm::Dijkstra => find_route_dijkstra(self.graph, start, goal)?,
            Algorithm::AStar => find_route_a_star(self.graph, start, goal)?,
        };
        let outcome = match found {
            Some(path) => SearchOutcome::Found(path),
            None => SearchOutcome::Unreachable,
        };
        Ok(self.outcome.insert(outcome))
    }

    /// Run one Dijkstra query.
    pub fn find_dijkstra(&mut self, start: PointId, goal: PointId) -> Result<&SearchOutcome> {
        self.find(Algorithm::Dijkstra, start, goal)
    }

    /// Run one A* query.
    pub fn find_a_star(&mut self, start: PointId, goal: PointId) -> Result<&SearchOutcome> {
        self.find(Algorithm::AStar, start, goal)
    }

    /// Result of the most recent query.
    ///
    /// Fails with [`Error::NoQueryRun`] before the first query.
    pub fn outcome(&self) -> Result<&SearchOutcome> {
        self.outcome.as_ref().ok_or(Error::NoQueryRun)
    }

    /// The graph this finder queries.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }
}
