//! Synthetic downtown-Berkeley graph.
//!
//! Eight intersections on a two-by-four street grid around Shattuck Avenue,
//! plus two named points of interest that no road reaches (they are pruned
//! from traversal but stay searchable).

use std::io::Cursor;

use bm_graph::{GraphResult, NameIndexConfig, SpatialGraph, load_events_reader};

// Event stream in the order a markup parser would emit it: all nodes, then
// the ways, then the name tags.
const EVENTS_CSV: &str = "\
event,id,lat,lon,other,name\n\
node,100,37.8716,-122.2686,,\n\
node,101,37.8716,-122.2673,,\n\
node,102,37.8703,-122.2686,,\n\
node,103,37.8703,-122.2673,,\n\
node,104,37.8690,-122.2686,,\n\
node,105,37.8690,-122.2673,,\n\
node,106,37.8677,-122.2686,,\n\
node,107,37.8677,-122.2673,,\n\
node,200,37.8794,-122.2690,,\n\
node,201,37.8700,-122.2680,,\n\
connect,100,,,101,\n\
connect,100,,,102,\n\
connect,101,,,103,\n\
connect,102,,,103,\n\
connect,102,,,104,\n\
connect,103,,,105,\n\
connect,104,,,105,\n\
connect,104,,,106,\n\
connect,105,,,107,\n\
connect,106,,,107,\n\
name,100,,,,Shattuck Avenue & University Avenue\n\
name,102,,,,Shattuck Avenue & Center Street\n\
name,104,,,,Shattuck Avenue & Allston Way\n\
name,200,,,,\"Peet's Coffee & Tea\"\n\
name,201,,,,Pegasus Books\n\
name,105,,,,Top Dog\n\
";

/// Load and seal the demo graph.
pub fn build_graph() -> GraphResult<SpatialGraph> {
    load_events_reader(Cursor::new(EVENTS_CSV), NameIndexConfig::default())
}
