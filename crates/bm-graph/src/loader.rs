//! CSV graph-event loader.
//!
//! # CSV format
//!
//! One row per load event, applied in file order.  Unused columns are left
//! empty.
//!
//! ```csv
//! event,id,lat,lon,other,name
//! node,53085003,37.8697,-122.2597,,
//! node,53085004,37.8700,-122.2590,,
//! connect,53085003,,,53085004,
//! name,53085004,,,,Peet's Coffee
//! ```
//!
//! | `event`   | Required columns     | Builder call                         |
//! |-----------|----------------------|--------------------------------------|
//! | `node`    | `id`, `lat`, `lon`   | `add_node(name or "", id, lat, lon)` |
//! | `connect` | `id`, `other`        | `connect(id, other)`                 |
//! | `name`    | `id`, `name`         | `add_name(id, name)`                 |
//!
//! The graph is sealed once the last row has been applied.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bm_core::{GeoPoint, NodeId};

use crate::graph::{SpatialGraph, SpatialGraphBuilder};
use crate::names::NameIndexConfig;
use crate::GraphError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRecord {
    event: String,
    id:    i64,
    lat:   Option<f64>,
    lon:   Option<f64>,
    other: Option<i64>,
    name:  Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and seal a graph from a CSV event file.
pub fn load_events_csv(path: &Path, config: NameIndexConfig) -> Result<SpatialGraph, GraphError> {
    let file = std::fs::File::open(path).map_err(GraphError::Io)?;
    load_events_reader(file, config)
}

/// Like [`load_events_csv`] but accepts any `Read` source.
///
/// # Errors
///
/// - [`GraphError::Parse`] for malformed rows, unknown event kinds, or
///   missing required columns (the message carries the 1-based data row).
/// - [`GraphError::Core`] for out-of-range coordinates.
/// - [`GraphError::NodeNotFound`] when a `connect` row names a node that no
///   earlier `node` row created.
pub fn load_events_reader<R: Read>(
    reader: R,
    config: NameIndexConfig,
) -> Result<SpatialGraph, GraphError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = SpatialGraphBuilder::with_config(config);

    for (i, result) in csv_reader.deserialize::<EventRecord>().enumerate() {
        let row = i + 1;
        let rec = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        apply(&mut builder, rec, row)?;
    }

    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn apply(builder: &mut SpatialGraphBuilder, rec: EventRecord, row: usize) -> Result<(), GraphError> {
    let id = NodeId(rec.id);
    match rec.event.trim() {
        "node" => {
            let (Some(lat), Some(lon)) = (rec.lat, rec.lon) else {
                return Err(missing(row, "lat/lon"));
            };
            let pos = GeoPoint::try_new(lat, lon)?;
            builder.add_node(rec.name.unwrap_or_default(), id, pos.lat, pos.lon);
        }
        "connect" => {
            let other = rec.other.ok_or_else(|| missing(row, "other"))?;
            builder.connect(id, NodeId(other))?;
        }
        "name" => {
            let name = rec.name.ok_or_else(|| missing(row, "name"))?;
            builder.add_name(id, name);
        }
        other => {
            return Err(GraphError::Parse(format!(
                "row {row}: unknown event {other:?}: expected \"node\", \"connect\", or \"name\""
            )));
        }
    }
    Ok(())
}

fn missing(row: usize, what: &str) -> GraphError {
    GraphError::Parse(format!("row {row}: missing {what}"))
}
