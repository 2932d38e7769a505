//! Strongly typed map-node identifier.
//!
//! Node ids come straight from the map extract (OSM ids are signed 64-bit
//! integers), so unlike a dense `Vec` index they are sparse keys.  The inner
//! integer is `pub` so loaders can wrap raw ids without ceremony.

use std::fmt;
use std::str::FromStr;

/// Identifier of an intersection or point of interest.
///
/// `Copy + Ord + Hash` so it works as a map key and sorts for deterministic
/// iteration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub i64);

impl NodeId {
    /// Sentinel meaning "no valid node" (`-1`).
    pub const INVALID: NodeId = NodeId(-1);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for NodeId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<i64> for NodeId {
    #[inline(always)]
    fn from(raw: i64) -> NodeId {
        NodeId(raw)
    }
}

impl From<NodeId> for i64 {
    #[inline(always)]
    fn from(id: NodeId) -> i64 {
        id.0
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(NodeId)
    }
}
