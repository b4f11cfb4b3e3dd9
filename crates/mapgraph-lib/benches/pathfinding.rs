use criterion::{criterion_group, criterion_main, Criterion};
use mapgraph_lib::{
    find_route_a_star, find_route_dijkstra, Graph, GraphBuilder, RawPoint, RawWay,
};
use std::hint::black_box;

/// Square lattice of streets, `size` points on a side.
fn grid_graph(size: i64) -> Graph {
    let mut points = Vec::new();
    let mut ways = Vec::new();

    for row in 0..size {
        for col in 0..size {
            points.push(RawPoint {
                id: row * size + col,
                lat: row as f64 * 0.01,
                lon: col as f64 * 0.01,
            });
        }
        ways.push(RawWay {
            points: (0..size).map(|col| row * size + col).collect(),
        });
    }
    for col in 0..size {
        ways.push(RawWay {
            points: (0..size).map(|row| row * size + col).collect(),
        });
    }

    let mut builder = GraphBuilder::new(points, ways);
    builder.build().expect("grid builds");
    builder.into_graph().expect("grid is finalized")
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = grid_graph(50);
    let start = 0;
    let goal = 50 * 50 - 1;

    c.bench_function("dijkstra_grid_corner_to_corner", |b| {
        b.iter(|| {
            let path = find_route_dijkstra(&graph, start, goal)
                .expect("valid endpoints")
                .expect("route exists");
            black_box(path.total_distance())
        });
    });

    c.bench_function("astar_grid_corner_to_corner", |b| {
        b.iter(|| {
            let path = find_route_a_star(&graph, start, goal)
                .expect("valid endpoints")
                .expect("route exists");
            black_box(path.total_distance())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
