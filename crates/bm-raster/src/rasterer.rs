//! Viewport → tile-grid selection.
//!
//! # Algorithm
//!
//! 1. **Depth.**  Each level halves the longitude degrees-per-pixel (DPP) of
//!    the one above.  Starting from the root tile's DPP, descend until the
//!    tiles are at least as fine as the viewport asks for, or the deepest
//!    level is reached.  This is the coarsest depth that satisfies the query.
//! 2. **Columns.**  Walk `x = 0, 1, …` eastward until a tile's east edge
//!    reaches the query's east edge, counting tiles whose east edge is at or
//!    past the query's west edge.  The result is the contiguous range ending
//!    at the last `x` walked.
//! 3. **Rows.**  Same walk southward over `y` against the query's latitude
//!    span.
//! 4. **Grid.**  Rows north→south, columns west→east.
//!
//! Only the viewport *width* drives resolution; the height is accepted and
//! ignored, and the rows are chosen purely from the latitude span.
//!
//! Walks stop at the last tile of the axis, so queries spilling past the
//! root box are clipped to tiles that exist.

use std::ops::RangeInclusive;

use crate::config::DEPTH_LIMIT;
use crate::{BoundingBox, RasterConfig, RasterResult, TileId};

// ── Request / response ────────────────────────────────────────────────────────

/// A viewport query: the box to show and the pixel size to show it at.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterRequest {
    pub ullon: f64,
    pub lrlon: f64,
    pub ullat: f64,
    pub lrlat: f64,
    /// Viewport width in pixels.
    pub w: f64,
    /// Viewport height in pixels.  Unused by tile selection.
    pub h: f64,
}

impl RasterRequest {
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.ullon, self.ullat, self.lrlon, self.lrlat)
    }

    /// Longitude degrees per pixel the viewport needs.
    pub fn lon_dpp(&self) -> f64 {
        (self.ullon - self.lrlon).abs() / self.w
    }
}

/// The tiles to draw and where the assembled image sits on the map.
///
/// Always carries a non-empty grid; when `query_success` is `false` the grid
/// is a best-effort answer the caller should not display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapRaster {
    pub render_grid:   Vec<Vec<TileId>>,
    pub raster_ul_lon: f64,
    pub raster_ul_lat: f64,
    pub raster_lr_lon: f64,
    pub raster_lr_lat: f64,
    pub depth:         u8,
    pub query_success: bool,
}

impl MapRaster {
    /// Corners of the assembled image as a box.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.raster_ul_lon, self.raster_ul_lat, self.raster_lr_lon, self.raster_lr_lat)
    }

    /// The grid as image file names.
    pub fn file_names(&self) -> Vec<Vec<String>> {
        self.render_grid
            .iter()
            .map(|row| row.iter().map(TileId::to_string).collect())
            .collect()
    }
}

// ── Rasterer ──────────────────────────────────────────────────────────────────

/// Selects tiles against a fixed [`RasterConfig`].
///
/// Holds no mutable state: share one instance freely across threads.
#[derive(Clone, Debug)]
pub struct Rasterer {
    config:   RasterConfig,
    base_dpp: f64,
}

impl Rasterer {
    /// `config.max_depth` above [`DEPTH_LIMIT`] is clamped to it.
    pub fn new(mut config: RasterConfig) -> Self {
        if config.max_depth > DEPTH_LIMIT {
            log::warn!("max_depth {} clamped to {DEPTH_LIMIT}", config.max_depth);
            config.max_depth = DEPTH_LIMIT;
        }
        let base_dpp = config.base_dpp();
        Self { config, base_dpp }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Coarsest depth whose DPP is `<= query_dpp`, capped at `max_depth`.
    pub fn depth_for(&self, query_dpp: f64) -> u8 {
        let mut dpp = self.base_dpp;
        let mut depth = 0u8;
        while depth < self.config.max_depth && dpp > query_dpp {
            depth += 1;
            dpp /= 2.0;
        }
        depth
    }

    /// Geographic extent of `tile`.
    pub fn tile_bounds(&self, tile: TileId) -> BoundingBox {
        let root = &self.config.root;
        let n = self.config.tiles_per_axis(tile.depth) as f64;
        let lat_size = (root.ul_lat - root.lr_lat) / n;
        let lon_size = (root.lr_lon - root.ul_lon) / n;

        let ul_lon = root.ul_lon + lon_size * tile.x as f64;
        let ul_lat = root.ul_lat - lat_size * tile.y as f64;
        BoundingBox {
            ul_lon,
            ul_lat,
            lr_lon: ul_lon + lon_size,
            lr_lat: ul_lat - lat_size,
        }
    }

    /// Extent of the tile stored under the image file `name`.
    pub fn tile_bounds_by_name(&self, name: &str) -> RasterResult<BoundingBox> {
        Ok(self.tile_bounds(name.parse()?))
    }

    /// Column indices at `depth` intersecting `[ullon, lrlon]`.
    pub fn tiles_x(&self, depth: u8, ullon: f64, lrlon: f64) -> RangeInclusive<u32> {
        let last = self.config.tiles_per_axis(depth) - 1;
        let east_edge = |x| self.tile_bounds(TileId::new(depth, x, 0)).lr_lon;

        let mut x = 0u32;
        let mut count = 0u32;
        while x < last && east_edge(x) < lrlon {
            if east_edge(x) >= ullon {
                count += 1;
            }
            x += 1;
        }
        count += 1;
        (x + 1 - count)..=x
    }

    /// Row indices at `depth` intersecting `[lrlat, ullat]`.  Rows grow
    /// southward while latitude shrinks, so the comparisons are mirrored.
    pub fn tiles_y(&self, depth: u8, ullat: f64, lrlat: f64) -> RangeInclusive<u32> {
        let last = self.config.tiles_per_axis(depth) - 1;
        let south_edge = |y| self.tile_bounds(TileId::new(depth, 0, y)).lr_lat;

        let mut y = 0u32;
        let mut count = 0u32;
        while y < last && south_edge(y) > lrlat {
            if south_edge(y) <= ullat {
                count += 1;
            }
            y += 1;
        }
        count += 1;
        (y + 1 - count)..=y
    }

    /// `false` for inverted or empty boxes and boxes wholly outside the root.
    pub fn validate(&self, query: &BoundingBox) -> bool {
        !query.is_degenerate() && !query.is_disjoint(&self.config.root)
    }

    /// Answer a viewport query.
    ///
    /// Never fails: rejected queries come back with `query_success == false`
    /// alongside whatever grid the walk produced.
    pub fn raster(&self, request: &RasterRequest) -> MapRaster {
        let depth = self.depth_for(request.lon_dpp());
        let xs = self.tiles_x(depth, request.ullon, request.lrlon);
        let ys = self.tiles_y(depth, request.ullat, request.lrlat);

        let render_grid: Vec<Vec<TileId>> = ys
            .clone()
            .map(|y| xs.clone().map(|x| TileId::new(depth, x, y)).collect())
            .collect();

        let first = self.tile_bounds(TileId::new(depth, *xs.start(), *ys.start()));
        let last = self.tile_bounds(TileId::new(depth, *xs.end(), *ys.end()));
        let query_success = self.validate(&request.bbox());

        if query_success {
            log::debug!(
                "raster depth {depth}: {} x {} tiles from d{depth}_x{}_y{}",
                xs.clone().count(),
                ys.clone().count(),
                xs.start(),
                ys.start(),
            );
        } else {
            log::debug!("rejected raster query {:?}", request.bbox());
        }

        MapRaster {
            render_grid,
            raster_ul_lon: first.ul_lon,
            raster_ul_lat: first.ul_lat,
            raster_lr_lon: last.lr_lon,
            raster_lr_lat: last.lr_lat,
            depth,
            query_success,
        }
    }
}

impl Default for Rasterer {
    fn default() -> Self {
        Self::new(RasterConfig::default())
    }
}
