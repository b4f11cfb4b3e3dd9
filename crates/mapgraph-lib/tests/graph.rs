mod common;

use mapgraph_lib::{load_map, Error, GraphBuilder};

use common::{graph_from, line_map_source, map_file, raw_point, way};

#[test]
fn consecutive_way_pairs_become_symmetric_edges() {
    let graph = common::line_graph();

    assert_eq!(graph.neighbours(1), &[2]);
    assert_eq!(graph.neighbours(2), &[1, 3]);
    assert_eq!(graph.neighbours(3), &[2]);
}

#[test]
fn isolated_points_stay_queryable_with_empty_adjacency() {
    let graph = common::line_graph();

    assert!(graph.contains(4));
    assert!(graph.neighbours(4).is_empty());
}

#[test]
fn ways_sharing_points_do_not_duplicate_edges() {
    let graph = graph_from(
        vec![
            raw_point(1, 0.0, 0.0),
            raw_point(2, 0.0, 1.0),
            raw_point(3, 1.0, 1.0),
        ],
        vec![way(vec![1, 2]), way(vec![2, 1]), way(vec![1, 2, 3])],
    );

    assert_eq!(graph.neighbours(1), &[2]);
    assert_eq!(graph.neighbours(2), &[1, 3]);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn way_segments_referencing_unknown_points_are_skipped() {
    let graph = graph_from(
        vec![raw_point(1, 0.0, 0.0), raw_point(2, 0.0, 1.0)],
        vec![way(vec![1, 99, 2]), way(vec![1, 2])],
    );

    // 1-99 and 99-2 are dropped; the valid 1-2 segment survives.
    assert!(!graph.contains(99));
    assert_eq!(graph.neighbours(1), &[2]);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn graph_before_build_is_not_yet_built() {
    let builder = GraphBuilder::new(vec![raw_point(1, 0.0, 0.0)], vec![]);
    assert!(matches!(builder.graph().unwrap_err(), Error::NotYetBuilt));
}

#[test]
fn second_build_is_rejected() {
    let mut builder = GraphBuilder::new(vec![raw_point(1, 0.0, 0.0)], vec![]);
    builder.build().unwrap();
    assert!(matches!(builder.build().unwrap_err(), Error::AlreadyBuilt));
}

#[test]
fn repeated_graph_accessor_returns_the_same_graph() {
    let mut builder = GraphBuilder::new(
        vec![raw_point(1, 0.0, 0.0), raw_point(2, 0.0, 1.0)],
        vec![way(vec![1, 2])],
    );
    builder.build().unwrap();

    let first: *const _ = builder.graph().unwrap();
    let second: *const _ = builder.graph().unwrap();
    assert_eq!(first, second, "no recomputation between accessor calls");
}

#[test]
fn load_map_runs_the_full_protocol() {
    let file = map_file(&line_map_source());
    let (bounds, graph) = load_map(file.path()).expect("load map");

    assert_eq!(bounds.min_lat, 0.0);
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.neighbours(2), &[1, 3]);
}

#[test]
fn export_preserves_identity_across_edges() {
    let graph = common::line_graph();
    let export = graph.export();

    assert_eq!(export.points.len(), 4);
    // B is referenced from both A and C but appears once, keyed by id.
    assert_eq!(export.points[&1].edges, vec![2]);
    assert_eq!(export.points[&3].edges, vec![2]);
    assert_eq!(export.points[&2].edges, vec![1, 3]);
    assert!(export.points[&4].edges.is_empty());

    let encoded = serde_json::to_string(&export).expect("export encodes");
    assert!(encoded.contains("\"edges\":[1,3]"));
}

#[test]
fn points_sharing_coordinates_stay_distinct() {
    let graph = graph_from(
        vec![
            raw_point(1, 0.5, 0.5),
            raw_point(2, 0.5, 0.5),
            raw_point(3, 0.0, 0.0),
        ],
        vec![way(vec![1, 3])],
    );

    assert!(graph.contains(1));
    assert!(graph.contains(2));
    assert_eq!(graph.neighbours(1), &[3]);
    assert!(graph.neighbours(2).is_empty(), "identity is by id, not coordinates");
}
