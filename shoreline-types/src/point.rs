//! Point types.

use crate::math::normalize_angle;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// 2d cartesian point.
pub type Point2d = Point2<f64>;
/// 3d cartesian (ECEF) point.
pub type Point3d = Point3<f64>;

/// 2d point on the surface of the reference ellipsoid, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GeodeticPoint {
    lon: f64,
    lat: f64,
}

impl GeodeticPoint {
    /// Creates a new point from longitude and latitude values (in degrees).
    pub fn lonlat(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Returns the point with its longitude wrapped to `[-180, 180)`.
    pub fn normalized(&self) -> Self {
        Self {
            lon: normalize_angle(self.lon, -180.0, 360.0),
            lat: self.lat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_wraps_longitude_only() {
        let point = GeodeticPoint::lonlat(190.0, 45.0).normalized();
        assert_eq!(point.lon(), -170.0);
        assert_eq!(point.lat(), 45.0);

        let fixed = GeodeticPoint::lonlat(-150.0, 0.0);
        assert_eq!(fixed.normalized(), fixed);
    }
}
