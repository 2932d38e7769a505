//! Tile identity and its file-name encoding.

use std::fmt;
use std::str::FromStr;

use crate::RasterError;

/// One square tile of the quadtree: `depth` levels below the root, `x`
/// columns east of the west edge, `y` rows south of the north edge.
///
/// Formats as (and parses from) the image file name `d<depth>_x<x>_y<y>.png`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TileId {
    pub depth: u8,
    pub x:     u32,
    pub y:     u32,
}

impl TileId {
    #[inline]
    pub fn new(depth: u8, x: u32, y: u32) -> Self {
        Self { depth, x, y }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}_x{}_y{}.png", self.depth, self.x, self.y)
    }
}

impl FromStr for TileId {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RasterError::BadTileName(s.to_owned());

        let body = s
            .strip_prefix('d')
            .and_then(|rest| rest.strip_suffix(".png"))
            .ok_or_else(bad)?;
        let (depth, rest) = body.split_once("_x").ok_or_else(bad)?;
        let (x, y) = rest.split_once("_y").ok_or_else(bad)?;

        Ok(TileId {
            depth: parse_field(depth).ok_or_else(bad)?,
            x:     parse_field(x).ok_or_else(bad)?,
            y:     parse_field(y).ok_or_else(bad)?,
        })
    }
}

/// Digits only: rejects the `+` sign that `str::parse` would accept.
fn parse_field<T: FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(feature = "serde")]
impl serde::Serialize for TileId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TileId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
