//! Shortest-path search over a finalized graph.
//!
//! Both algorithms share the frontier machinery: a binary heap turned into a
//! min-heap by reversed ordering, with ties broken by point identifier so
//! results are reproducible across runs. Dijkstra finalizes the goal the
//! moment it pops from the frontier; A* orders the frontier by cumulative
//! distance plus the great-circle estimate to the goal, which never exceeds
//! the true remaining cost and therefore preserves optimality.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;

use crate::error::{Endpoint, Error, Result};
use crate::graph::Graph;
use crate::model::{Point, PointId};

/// An ordered walk from start to goal inclusive, with its aggregate length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    points: Vec<Point>,
    total_distance: f64,
}

impl Path {
    /// Points along the path, start and goal inclusive.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Aggregate great-circle length of the path in meters.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Number of edges traversed.
    pub fn leg_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterate over the path's legs as (from, to, meters) triples.
    pub fn legs(&self) -> impl Iterator<Item = (Point, Point, f64)> + '_ {
        self.points
            .windows(2)
            .map(|pair| (pair[0], pair[1], pair[0].distance_to(&pair[1])))
    }
}

/// Shortest path by cumulative edge distance, or `None` when the goal is
/// unreachable from the start.
pub fn find_route_dijkstra(graph: &Graph, start: PointId, goal: PointId) -> Result<Option<Path>> {
    let (start_point, _) = validate_endpoints(graph, start, goal)?;
    if start == goal {
        return Ok(Some(single_point_path(start_point)));
    }

    let mut distances: HashMap<PointId, f64> = HashMap::new();
    let mut parents: HashMap<PointId, PointId> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    distances.insert(start, 0.0);
    frontier.push(FrontierEntry::new(start, 0.0, 0.0));

    while let Some(entry) = frontier.pop() {
        if entry.node == goal {
            return Ok(Some(assemble_path(graph, &parents, start, goal)));
        }
        if is_stale(&distances, &entry) {
            continue;
        }

        let current = graph
            .point(entry.node)
            .expect("frontier only holds graph points");
        for &next in graph.neighbours(entry.node) {
            let neighbour = graph
                .point(next)
                .expect("adjacency only references graph points");
            let candidate = entry.cost.0 + current.distance_to(&neighbour);
            if candidate < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, candidate);
                parents.insert(next, entry.node);
                frontier.push(FrontierEntry::new(next, candidate, 0.0));
            }
        }
    }

    Ok(None)
}

/// Shortest path guided by the great-circle estimate to the goal, or `None`
/// when the goal is unreachable. Returns the same total distance as
/// [`find_route_dijkstra`] whenever a path exists.
pub fn find_route_a_star(graph: &Graph, start: PointId, goal: PointId) -> Result<Option<Path>> {
    let (start_point, goal_point) = validate_endpoints(graph, start, goal)?;
    if start == goal {
        return Ok(Some(single_point_path(start_point)));
    }

    let mut g_score: HashMap<PointId, f64> = HashMap::new();
    let mut parents: HashMap<PointId, PointId> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    g_score.insert(start, 0.0);
    frontier.push(FrontierEntry::new(
        start,
        0.0,
        start_point.distance_to(&goal_point),
    ));

    while let Some(entry) = frontier.pop() {
        if entry.node == goal {
            return Ok(Some(assemble_path(graph, &parents, start, goal)));
        }
        if is_stale(&g_score, &entry) {
            continue;
        }

        let current = graph
            .point(entry.node)
            .expect("frontier only holds graph points");
        for &next in graph.neighbours(entry.node) {
            let neighbour = graph
                .point(next)
                .expect("adjacency only references graph points");
            let tentative = entry.cost.0 + current.distance_to(&neighbour);
            if tentative < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative);
                parents.insert(next, entry.node);
                frontier.push(FrontierEntry::new(
                    next,
                    tentative,
                    neighbour.distance_to(&goal_point),
                ));
            }
        }
    }

    Ok(None)
}

fn validate_endpoints(graph: &Graph, start: PointId, goal: PointId) -> Result<(Point, Point)> {
    let start_point = graph.point(start).ok_or(Error::UnknownPoint {
        endpoint: Endpoint::Start,
        id: start,
    })?;
    let goal_point = graph.point(goal).ok_or(Error::UnknownPoint {
        endpoint: Endpoint::Goal,
        id: goal,
    })?;
    Ok((start_point, goal_point))
}

fn single_point_path(point: Point) -> Path {
    Path {
        points: vec![point],
        total_distance: 0.0,
    }
}

fn is_stale(best: &HashMap<PointId, f64>, entry: &FrontierEntry) -> bool {
    match best.get(&entry.node) {
        Some(&cost) => entry.cost.0 > cost,
        None => true,
    }
}

fn assemble_path(
    graph: &Graph,
    parents: &HashMap<PointId, PointId>,
    start: PointId,
    goal: PointId,
) -> Path {
    let mut ids = Vec::new();
    let mut current = goal;
    loop {
        ids.push(current);
        if current == start {
            break;
        }
        current = parents[&current];
    }
    ids.reverse();

    let points: Vec<Point> = ids
        .into_iter()
        .map(|id| graph.point(id).expect("path only visits graph points"))
        .collect();
    let total_distance = points
        .windows(2)
        .map(|pair| pair[0].distance_to(&pair[1]))
        .sum();

    Path {
        points,
        total_distance,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier entry ordered by priority (cost plus heuristic estimate), with
/// the point identifier as the deterministic tie-breaker. The estimate is
/// zero under Dijkstra, collapsing priority to plain cumulative cost.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: PointId,
    cost: FloatOrd,
    priority: FloatOrd,
}

impl FrontierEntry {
    fn new(node: PointId, cost: f64, estimate: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            priority: FloatOrd(cost + estimate),
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_pops_lowest_priority_first() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry::new(1, 5.0, 0.0));
        heap.push(FrontierEntry::new(2, 1.0, 0.0));
        heap.push(FrontierEntry::new(3, 3.0, 0.0));

        assert_eq!(heap.pop().unwrap().node, 2);
        assert_eq!(heap.pop().unwrap().node, 3);
        assert_eq!(heap.pop().unwrap().node, 1);
    }

    #[test]
    fn frontier_breaks_priority_ties_by_identifier() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry::new(9, 2.0, 0.0));
        heap.push(FrontierEntry::new(4, 2.0, 0.0));

        assert_eq!(heap.pop().unwrap().node, 4);
        assert_eq!(heap.pop().unwrap().node, 9);
    }

    #[test]
    fn estimate_contributes_to_priority() {
        let near = FrontierEntry::new(1, 10.0, 1.0);
        let far = FrontierEntry::new(2, 8.0, 20.0);
        let mut heap = BinaryHeap::new();
        heap.push(near);
        heap.push(far);

        assert_eq!(heap.pop().unwrap().node, 1);
    }
}
