//! Raster-subsystem error type.
//!
//! Tile selection itself never fails (rejected queries are reported through
//! `MapRaster::query_success`); errors only arise when decoding tile names.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("malformed tile name {0:?}: expected \"d<depth>_x<x>_y<y>.png\"")]
    BadTileName(String),
}

pub type RasterResult<T> = Result<T, RasterError>;
