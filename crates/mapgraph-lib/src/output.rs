use std::fmt::Write;

use serde::Serialize;

use crate::model::PointId;
use crate::path::Path;
use crate::routing::Algorithm;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// One line per step with leg and cumulative distances.
    Itinerary,
    /// Single-line identifier chain with the total distance.
    Compact,
}

/// Step taken during traversal of a computed path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: PointId,
    pub lat: f64,
    pub lon: f64,
    /// Meters from the previous step; zero for the starting point.
    pub leg_distance: f64,
    /// Meters travelled from the start up to and including this step.
    pub cumulative_distance: f64,
}

/// Structured representation of a computed path that consumers can render or
/// serialise, with per-step and aggregate distances resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: Algorithm,
    pub start: PointId,
    pub goal: PointId,
    pub legs: usize,
    pub total_distance: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Path`] into a summary with resolved distances.
    pub fn from_path(algorithm: Algorithm, path: &Path) -> Self {
        let mut cumulative = 0.0;
        let mut previous = None;
        let steps = path
            .points()
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let leg_distance = match previous {
                    Some(prev) => point.distance_to(&prev),
                    None => 0.0,
                };
                cumulative += leg_distance;
                previous = Some(*point);
                RouteStep {
                    index,
                    id: point.id,
                    lat: point.lat,
                    lon: point.lon,
                    leg_distance,
                    cumulative_distance: cumulative,
                }
            })
            .collect::<Vec<_>>();

        let start = steps.first().map(|step| step.id).unwrap_or_default();
        let goal = steps.last().map(|step| step.id).unwrap_or_default();

        Self {
            algorithm,
            start,
            goal,
            legs: path.leg_count(),
            total_distance: path.total_distance(),
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::Itinerary => self.render_itinerary(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_itinerary(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} legs, {:.1} m, algorithm: {})",
            self.start, self.goal, self.legs, self.total_distance, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({:.6}, {:.6})  +{:.1} m  ={:.1} m",
                step.index, step.id, step.lat, step.lon, step.leg_distance, step.cumulative_distance
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let chain = self
            .steps
            .iter()
            .map(|step| step.id.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{} ({:.1} m via {})\n", chain, self.total_distance, self.algorithm)
    }
}
