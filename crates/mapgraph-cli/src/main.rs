use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mapgraph_lib::{
    load_map, Algorithm, PathFinder, PointId, RouteRenderMode, RouteSummary, SpatialIndex,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road-map graph and shortest-path utilities")]
struct Cli {
    /// Path to the map source file.
    #[arg(long)]
    map: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report the map's bounds and graph size.
    Info,
    /// Compute a shortest route between two point identifiers.
    Route {
        /// Starting point identifier.
        #[arg(long)]
        from: PointId,
        /// Destination point identifier.
        #[arg(long)]
        to: PointId,
        /// Search algorithm: dijkstra or a-star.
        #[arg(long, default_value_t = Algorithm::AStar)]
        algorithm: Algorithm,
        /// Emit the route as JSON instead of a textual itinerary.
        #[arg(long)]
        json: bool,
    },
    /// Find the point closest to the given coordinates.
    Nearest {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },
    /// Write the finalized graph as JSON to stdout.
    Export,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Info => handle_info(&cli.map),
        Command::Route {
            from,
            to,
            algorithm,
            json,
        } => handle_route(&cli.map, from, to, algorithm, json),
        Command::Nearest { lat, lon } => handle_nearest(&cli.map, lat, lon),
        Command::Export => handle_export(&cli.map),
    }
}

fn handle_info(map: &Path) -> Result<()> {
    let (bounds, graph) = load_map(map)
        .with_context(|| format!("failed to load map from {}", map.display()))?;

    println!(
        "Bounds: lat [{}, {}], lon [{}, {}]",
        bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
    );
    println!("Points: {}", graph.len());
    println!("Edges: {}", graph.edge_count());
    Ok(())
}

fn handle_route(map: &Path, from: PointId, to: PointId, algorithm: Algorithm, json: bool) -> Result<()> {
    let (_, graph) = load_map(map)
        .with_context(|| format!("failed to load map from {}", map.display()))?;

    let mut finder = PathFinder::new(&graph);
    let outcome = finder
        .find(algorithm, from, to)
        .context("route query failed")?;

    let Some(path) = outcome.path() else {
        println!("No route between {from} and {to}.");
        return Ok(());
    };

    let summary = RouteSummary::from_path(algorithm, path);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render(RouteRenderMode::Itinerary));
    }
    Ok(())
}

fn handle_nearest(map: &Path, lat: f64, lon: f64) -> Result<()> {
    let (_, graph) = load_map(map)
        .with_context(|| format!("failed to load map from {}", map.display()))?;

    let index = SpatialIndex::build(&graph);
    match index.nearest(lat, lon) {
        Some(hit) => println!(
            "The closest point to ({lat}, {lon}) is {} ({:.1} m away)",
            hit.id, hit.distance
        ),
        None => println!("The map holds no points."),
    }
    Ok(())
}

fn handle_export(map: &Path) -> Result<()> {
    let (_, graph) = load_map(map)
        .with_context(|| format!("failed to load map from {}", map.display()))?;

    println!("{}", serde_json::to_string_pretty(&graph.export())?);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
