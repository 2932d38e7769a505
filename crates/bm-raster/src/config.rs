//! Tile-set configuration.
//!
//! The defaults describe the Berkeley tile set: 256 px tiles rendered for
//! depths 0 through 7 over the root box below.

use crate::BoundingBox;

pub const ROOT_ULLAT: f64 = 37.892195547244356;
pub const ROOT_ULLON: f64 = -122.2998046875;
pub const ROOT_LRLAT: f64 = 37.82280243352756;
pub const ROOT_LRLON: f64 = -122.2119140625;

/// Edge length of every tile image, in pixels.
pub const TILE_SIZE: u32 = 256;

/// Deepest level for which tiles exist (`128 × 128` tiles).
pub const MAX_DEPTH: u8 = 7;

/// Deepest level whose per-axis tile count fits a `u32` tile index.
pub const DEPTH_LIMIT: u8 = 31;

/// The fixed constants a [`Rasterer`](crate::Rasterer) works against.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterConfig {
    /// Area covered by the single depth-0 tile.
    pub root:      BoundingBox,
    pub tile_size: u32,
    pub max_depth: u8,
}

impl RasterConfig {
    /// Longitude degrees per pixel of the depth-0 tile.
    pub fn base_dpp(&self) -> f64 {
        (self.root.lr_lon - self.root.ul_lon).abs() / self.tile_size as f64
    }

    /// Tiles along one axis at `depth` (`2^depth`).
    #[inline]
    pub fn tiles_per_axis(&self, depth: u8) -> u32 {
        1u32 << depth.min(DEPTH_LIMIT)
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            root:      BoundingBox::new(ROOT_ULLON, ROOT_ULLAT, ROOT_LRLON, ROOT_LRLAT),
            tile_size: TILE_SIZE,
            max_depth: MAX_DEPTH,
        }
    }
}
