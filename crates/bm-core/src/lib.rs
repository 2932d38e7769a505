//! `bm-core` — foundational types for the `bearmaps` workspace.
//!
//! This crate is a dependency of every other `bm-*` crate.  It has no `bm-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `NodeId`                                                  |
//! | [`geo`]   | `GeoPoint`, haversine distance (miles), initial bearing   |
//! | [`error`] | `BmError`, `BmResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BmError, BmResult};
pub use geo::{EARTH_RADIUS_MILES, GeoPoint, bearing_deg, distance_miles};
pub use ids::NodeId;
