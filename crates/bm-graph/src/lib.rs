//! `bm-graph` — spatial road graph, nearest-node lookup, and name search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`graph`]  | `SpatialGraph` (CSR adjacency), `SpatialGraphBuilder`, `Location` |
//! | [`names`]  | `NameIndex`, `NameIndexConfig`, `normalize`                    |
//! | [`loader`] | `load_events_csv`, `load_events_reader`                        |
//! | [`osm`]    | `load_from_pbf` (feature = `"osm"` only)                       |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod graph;
pub mod loader;
pub mod names;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use bm_core::{bearing_deg, distance_miles};
pub use error::{GraphError, GraphResult};
pub use graph::{Location, Node, SpatialGraph, SpatialGraphBuilder};
pub use loader::{load_events_csv, load_events_reader};
pub use names::{NameIndex, NameIndexConfig, normalize};
