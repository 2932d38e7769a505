//! Geographic coordinate type and great-circle math.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Distances are reported in
//! **miles** on a spherical Earth of radius [`EARTH_RADIUS_MILES`]; bearings
//! in degrees in the range `(-180, 180]` (not normalized to a compass
//! heading, callers wanting `[0, 360)` add 360 to negative values).
//!
//! Both free functions take their arguments in `lon, lat` order, matching the
//! order in which map front ends pass query points.

use crate::{BmError, BmResult};

/// Mean Earth radius used by every distance in the workspace, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Like [`new`](Self::new) but rejects non-finite or out-of-range values.
    pub fn try_new(lat: f64, lon: f64) -> BmResult<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if lat_ok && lon_ok {
            Ok(Self { lat, lon })
        } else {
            Err(BmError::InvalidCoordinate { lat, lon })
        }
    }

    /// Haversine great-circle distance in miles.
    #[inline]
    pub fn distance_miles(self, other: GeoPoint) -> f64 {
        distance_miles(self.lon, self.lat, other.lon, other.lat)
    }

    /// Initial great-circle bearing from `self` towards `other`, in degrees.
    #[inline]
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        bearing_deg(self.lon, self.lat, other.lon, other.lat)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance in miles between `(lon_a, lat_a)` and
/// `(lon_b, lat_b)`.
///
/// ```text
/// a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
/// c = 2 · atan2(√a, √(1−a))
/// d = R · c
/// ```
pub fn distance_miles(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> f64 {
    let phi1 = lat_a.to_radians();
    let phi2 = lat_b.to_radians();
    let d_phi = (lat_b - lat_a).to_radians();
    let d_lambda = (lon_b - lon_a).to_radians();

    let a = (d_phi * 0.5).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda * 0.5).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Initial bearing in degrees from `(lon1, lat1)` towards `(lon2, lat2)`.
///
/// Result is `atan2(y, x)` converted to degrees, so it lies in `(-180, 180]`.
pub fn bearing_deg(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    y.atan2(x).to_degrees()
}
