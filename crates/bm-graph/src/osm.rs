//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! let graph = bm_graph::osm::load_from_pbf(Path::new("map.osm.pbf"), NameIndexConfig::default())?;
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use osmpbf::{Element, ElementReader};

use bm_core::NodeId;

use crate::graph::{SpatialGraph, SpatialGraphBuilder};
use crate::names::NameIndexConfig;
use crate::GraphError;

/// Position of one OSM node, kept until the builder is sized.
struct OsmNode {
    id:  i64,
    lat: f64,
    lon: f64,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Load and seal a graph from an OSM PBF file.
///
/// # Errors
///
/// Returns [`GraphError::Io`] when the file cannot be opened and
/// [`GraphError::Osm`] when its contents cannot be decoded.
pub fn load_from_pbf(path: &Path, config: NameIndexConfig) -> Result<SpatialGraph, GraphError> {
    let reader = ElementReader::new(BufReader::new(File::open(path)?));

    let mut osm_nodes: Vec<OsmNode> = Vec::new();
    let mut osm_names: Vec<(i64, String)> = Vec::new();
    let mut road_ways: Vec<Vec<i64>> = Vec::new();

    // ── Phase 1: collect nodes, names and road ways in one pass ───────────
    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                osm_nodes.push(OsmNode { id: n.id(), lat: n.lat(), lon: n.lon() });
                if let Some((_, name)) = n.tags().find(|(k, _)| *k == "name") {
                    osm_names.push((n.id(), name.to_owned()));
                }
            }
            Element::DenseNode(n) => {
                osm_nodes.push(OsmNode { id: n.id(), lat: n.lat(), lon: n.lon() });
                if let Some((_, name)) = n.tags().find(|(k, _)| *k == "name") {
                    osm_names.push((n.id(), name.to_owned()));
                }
            }
            Element::Way(w) => {
                let drivable = w
                    .tags()
                    .find(|(k, _)| *k == "highway")
                    .is_some_and(|(_, v)| is_drivable(v));
                if drivable {
                    road_ways.push(w.refs().collect());
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    // ── Phase 2: add every node to a pre-sized builder ────────────────────
    let mut builder = SpatialGraphBuilder::with_capacity(osm_nodes.len(), config);
    for n in osm_nodes {
        builder.add_node("", NodeId(n.id), n.lat, n.lon);
    }

    // ── Phase 3: connect consecutive way refs ─────────────────────────────
    let mut skipped = 0usize;
    for refs in &road_ways {
        for pair in refs.windows(2) {
            let (a, b) = (NodeId(pair[0]), NodeId(pair[1]));
            // Clipped extracts reference nodes outside the bounding box.
            if builder.contains(a) && builder.contains(b) {
                builder.connect(a, b)?;
            } else {
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        log::debug!("skipped {skipped} road segments with refs outside the extract");
    }

    // ── Phase 4: attach names ─────────────────────────────────────────────
    for (id, name) in osm_names {
        builder.add_name(NodeId(id), name);
    }

    Ok(builder.build())
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` for `highway` values that carry car traffic.
fn is_drivable(highway: &str) -> bool {
    matches!(
        highway,
        "motorway" | "motorway_link"
            | "trunk" | "trunk_link"
            | "primary" | "primary_link"
            | "secondary" | "secondary_link"
            | "tertiary" | "tertiary_link"
            | "unclassified" | "residential" | "living_street"
    )
}
