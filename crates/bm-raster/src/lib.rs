//! `bm-raster` — pick the map tiles that cover a viewport.
//!
//! The tile set is a quadtree over a fixed root box: depth `d` splits the
//! root into `2^d × 2^d` square tiles, each rendered at the same pixel size.
//! Given a viewport box and its width in pixels, [`Rasterer::raster`] returns
//! the grid of tiles at the coarsest depth that is still sharp enough.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`tile`]     | `TileId` and its `d<depth>_x<x>_y<y>.png` encoding     |
//! | [`bounds`]   | `BoundingBox`                                          |
//! | [`config`]   | `RasterConfig`, Berkeley root constants                |
//! | [`rasterer`] | `Rasterer`, `RasterRequest`, `MapRaster`               |
//! | [`error`]    | `RasterError`, `RasterResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize`; `TileId` as its file name |

pub mod bounds;
pub mod config;
pub mod error;
pub mod rasterer;
pub mod tile;


pub use bounds::BoundingBox;
pub use config::RasterConfig;
pub use error::{RasterError, RasterResult};
pub use rasterer::{MapRaster, RasterRequest, Rasterer};
pub use tile::TileId;
