//! berkeley — end-to-end example for the bearmaps workspace.
//!
//! Loads a small synthetic street graph, then answers the two query families
//! a map front end sends: a viewport raster request and location lookups.
//! Results are printed as the JSON a front end would receive.
//!
//! Run with `RUST_LOG=debug` to see load and tile-selection logging.

mod network;

use anyhow::Result;

use bm_core::NodeId;
use bm_raster::{RasterRequest, Rasterer};

use network::build_graph;

// ── Constants ─────────────────────────────────────────────────────────────────

/// A ~300 px wide view of downtown Berkeley.
const VIEWPORT: RasterRequest = RasterRequest {
    ullon: -122.2712,
    lrlon: -122.2650,
    ullat: 37.8730,
    lrlat: 37.8665,
    w:     305.0,
    h:     300.0,
};

/// Where the user clicked.
const CLICK_LON: f64 = -122.2680;
const CLICK_LAT: f64 = 37.8698;

const SEARCH_PREFIX: &str = "pe";
const SEARCH_NAME: &str = "top dog";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== berkeley — bearmaps demo ===");
    println!();

    // 1. Load the graph.
    let graph = build_graph()?;
    println!(
        "Graph: {} nodes, {} connected, {} roads, {} indexed names",
        graph.node_count(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.names().len(),
    );

    // 2. Raster the viewport.
    let rasterer = Rasterer::default();
    let raster = rasterer.raster(&VIEWPORT);
    if !raster.query_success {
        log::warn!("viewport rejected: {:?}", VIEWPORT.bbox());
    }
    println!();
    println!("Raster:");
    println!("{}", serde_json::to_string_pretty(&raster)?);

    // 3. Nearest intersection to the click, and where it leads.
    let start = graph.closest(CLICK_LON, CLICK_LAT).unwrap_or(NodeId::INVALID);
    println!();
    if start.is_valid() {
        let node = graph.node(start)?;
        println!(
            "Closest to ({CLICK_LAT}, {CLICK_LON}): {} at {} ({:.4} mi away)",
            start,
            node.pos(),
            bm_core::distance_miles(CLICK_LON, CLICK_LAT, node.lon(), node.lat()),
        );
        for &next in graph.adjacent(start)? {
            println!(
                "  -> {:<12} {:>7.4} mi  bearing {:>7.2}°",
                next.to_string(),
                graph.distance(start, next)?,
                graph.bearing(start, next)?,
            );
        }
    } else {
        println!("Graph has no connected intersections");
    }

    // 4. Location search.
    println!();
    println!("Prefix {SEARCH_PREFIX:?}:");
    println!("{}", serde_json::to_string_pretty(&graph.locations_by_prefix(SEARCH_PREFIX))?);
    println!("Search {SEARCH_NAME:?}:");
    println!("{}", serde_json::to_string_pretty(&graph.locations(SEARCH_NAME))?);

    Ok(())
}
