// Shared fixtures for `mapgraph-lib` integration tests.
#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

use mapgraph_lib::{Graph, GraphBuilder, RawPoint, RawWay};

/// Build a graph directly from raw records, bypassing the parser.
pub fn graph_from(points: Vec<RawPoint>, ways: Vec<RawWay>) -> Graph {
    let mut builder = GraphBuilder::new(points, ways);
    builder.build().expect("fixture graph builds");
    builder.into_graph().expect("fixture graph is finalized")
}

pub fn raw_point(id: i64, lat: f64, lon: f64) -> RawPoint {
    RawPoint { id, lat, lon }
}

pub fn way(points: Vec<i64>) -> RawWay {
    RawWay { points }
}

/// Three points on the equator joined by one way, plus an isolated point.
///
/// A(1) at (0,0), B(2) at (0,1), C(3) at (0,2) connected A-B-C; D(4) at
/// (1,1) appears in no way.
pub fn line_graph() -> Graph {
    graph_from(
        vec![
            raw_point(1, 0.0, 0.0),
            raw_point(2, 0.0, 1.0),
            raw_point(3, 0.0, 2.0),
            raw_point(4, 1.0, 1.0),
        ],
        vec![way(vec![1, 2, 3])],
    )
}

/// Serialize a bounds/points/ways source in the line-record map format.
pub fn map_source(
    bounds: (f64, f64, f64, f64),
    points: &[(i64, f64, f64)],
    ways: &[Vec<i64>],
) -> String {
    let mut source = String::new();
    source.push_str(&format!(
        "{{\"type\":\"bounds\",\"min_lat\":{},\"min_lon\":{},\"max_lat\":{},\"max_lon\":{}}}\n",
        bounds.0, bounds.1, bounds.2, bounds.3
    ));
    for (id, lat, lon) in points {
        source.push_str(&format!(
            "{{\"type\":\"point\",\"id\":{id},\"lat\":{lat},\"lon\":{lon}}}\n"
        ));
    }
    for way in ways {
        let ids = way
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        source.push_str(&format!("{{\"type\":\"way\",\"points\":[{ids}]}}\n"));
    }
    source
}

/// Write a map source to a temporary file kept alive by the returned handle.
pub fn map_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp map file");
    file.write_all(source.as_bytes()).expect("write map source");
    file.flush().expect("flush map source");
    file
}

/// The line_graph fixture as an on-disk map source.
pub fn line_map_source() -> String {
    map_source(
        (0.0, 0.0, 1.0, 2.0),
        &[
            (1, 0.0, 0.0),
            (2, 0.0, 1.0),
            (3, 0.0, 2.0),
            (4, 1.0, 1.0),
        ],
        &[vec![1, 2, 3]],
    )
}
