//! Closed-form conversions between geodetic and ECEF cartesian coordinates.

use crate::point::{GeodeticPoint, Point3d};
use crate::spheroid::Spheroid;
use std::f64::consts::FRAC_PI_2;

/// Converts a geodetic point to ECEF cartesian coordinates (meters).
///
/// The height above the ellipsoid is taken to be zero: shoreline vertices lie
/// on the surface of the reference ellipsoid.
pub fn geodetic_to_cartesian(point: &GeodeticPoint, spheroid: &Spheroid) -> Point3d {
    let e_sq = spheroid.eccentricity_squared();
    let (sin_lon, cos_lon) = point.lon_rad().sin_cos();
    let (sin_lat, cos_lat) = point.lat_rad().sin_cos();

    // Prime vertical radius of curvature.
    let n = spheroid.a() / (1.0 - e_sq * sin_lat * sin_lat).sqrt();

    Point3d::new(
        n * cos_lat * cos_lon,
        n * cos_lat * sin_lon,
        n * (1.0 - e_sq) * sin_lat,
    )
}

/// Converts an ECEF cartesian point (meters) back to geodetic degrees.
///
/// Uses the closed-form (non-iterative) inversion with the auxiliary angle
/// `θ = atan2(z·a, p·b)`. On the polar axis (`x = 0 ∧ y = 0`) longitude is
/// undefined; zero is returned together with ±90° latitude by the sign of `z`.
pub fn cartesian_to_geodetic(point: &Point3d, spheroid: &Spheroid) -> GeodeticPoint {
    let a = spheroid.a();
    let b = spheroid.b();
    let e_sq = spheroid.eccentricity_squared();
    let se_sq = spheroid.second_eccentricity_squared();

    if point.x == 0.0 && point.y == 0.0 {
        let lat = FRAC_PI_2.copysign(point.z);
        return GeodeticPoint::lonlat(0.0, lat.to_degrees());
    }

    let p = point.x.hypot(point.y);
    let theta = (point.z * a).atan2(p * b);
    let (sin_theta, cos_theta) = theta.sin_cos();

    let lat = (point.z + se_sq * b * sin_theta.powi(3)).atan2(p - e_sq * a * cos_theta.powi(3));
    let lon = point.y.atan2(point.x);

    GeodeticPoint::lonlat(lon.to_degrees(), lat.to_degrees())
}
