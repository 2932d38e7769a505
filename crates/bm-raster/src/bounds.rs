//! Longitude/latitude rectangles.

/// An axis-aligned box given by its upper-left (north-west) and lower-right
/// (south-east) corners.
///
/// A well-formed box has `ul_lon < lr_lon` and `ul_lat > lr_lat`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub ul_lon: f64,
    pub ul_lat: f64,
    pub lr_lon: f64,
    pub lr_lat: f64,
}

impl BoundingBox {
    #[inline]
    pub fn new(ul_lon: f64, ul_lat: f64, lr_lon: f64, lr_lat: f64) -> Self {
        Self { ul_lon, ul_lat, lr_lon, lr_lat }
    }

    /// East-west extent in degrees of longitude.
    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.lr_lon - self.ul_lon
    }

    /// North-south extent in degrees of latitude.
    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.ul_lat - self.lr_lat
    }

    /// `true` for empty or inverted boxes.
    pub fn is_degenerate(&self) -> bool {
        self.ul_lon >= self.lr_lon || self.ul_lat <= self.lr_lat
    }

    /// `true` when `self` lies entirely outside `other`.  Boxes that only
    /// share an edge are not disjoint.
    pub fn is_disjoint(&self, other: &BoundingBox) -> bool {
        self.lr_lon < other.ul_lon
            || self.ul_lon > other.lr_lon
            || self.lr_lat > other.ul_lat
            || self.ul_lat < other.lr_lat
    }

    /// Overlap of two boxes, `None` if they do not overlap with positive area.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let b = BoundingBox {
            ul_lon: self.ul_lon.max(other.ul_lon),
            ul_lat: self.ul_lat.min(other.ul_lat),
            lr_lon: self.lr_lon.min(other.lr_lon),
            lr_lat: self.lr_lat.max(other.lr_lat),
        };
        (!b.is_degenerate()).then_some(b)
    }

    /// `true` when `other` lies inside `self` (edges included).
    pub fn covers(&self, other: &BoundingBox) -> bool {
        self.ul_lon <= other.ul_lon
            && self.lr_lon >= other.lr_lon
            && self.ul_lat >= other.ul_lat
            && self.lr_lat <= other.lr_lat
    }
}
