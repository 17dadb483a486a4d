//! Geodesic distance strategies.
//!
//! Four interchangeable algorithms of increasing accuracy and cost compute the
//! distance in meters between two geodetic points: [`Haversine`] on a
//! representative sphere, the [`Andoyer`] and [`Thomas`] flattening
//! corrections, and the iterative [`Vincenty`] solution of the inverse
//! geodesic problem. Each one binds to an explicit [`Spheroid`], WGS84 by
//! default.

use crate::error::ShorelineError;
use shoreline_types::{GeodeticPoint, Spheroid};

/// Vincenty stops with a computation error after this many iterations.
const VINCENTY_MAX_ITERATIONS: usize = 200;
/// Convergence threshold on the longitude difference, radians.
const VINCENTY_EPSILON: f64 = 1e-12;

/// Algorithm computing the geodesic distance between two points in meters.
pub trait DistanceStrategy: Send + Sync {
    /// Distance between `p1` and `p2` in meters.
    fn distance(&self, p1: &GeodeticPoint, p2: &GeodeticPoint) -> Result<f64, ShorelineError>;

    /// The ellipsoid the strategy is bound to.
    fn model(&self) -> Spheroid;
}

/// Great-circle distance on a sphere of the ellipsoid's mean radius.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine {
    spheroid: Spheroid,
}

impl Haversine {
    /// Creates the strategy for the given ellipsoid.
    pub fn new(spheroid: Spheroid) -> Self {
        Self { spheroid }
    }
}

impl DistanceStrategy for Haversine {
    fn distance(&self, p1: &GeodeticPoint, p2: &GeodeticPoint) -> Result<f64, ShorelineError> {
        let half_dlat = (p2.lat_rad() - p1.lat_rad()) / 2.0;
        let half_dlon = (p2.lon_rad() - p1.lon_rad()) / 2.0;

        let h = half_dlat.sin().powi(2)
            + p1.lat_rad().cos() * p2.lat_rad().cos() * half_dlon.sin().powi(2);
        Ok(2.0 * self.spheroid.mean_radius() * h.sqrt().min(1.0).asin())
    }

    fn model(&self) -> Spheroid {
        // The strategy works on a sphere; report it as such.
        let r = self.spheroid.mean_radius();
        Spheroid::new(r, r)
    }
}

/// Andoyer–Lambert approximation: spherical distance with a first-order
/// flattening correction, accurate to a few meters over long ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Andoyer {
    spheroid: Spheroid,
}

impl Andoyer {
    /// Creates the strategy for the given ellipsoid.
    pub fn new(spheroid: Spheroid) -> Self {
        Self { spheroid }
    }
}

impl DistanceStrategy for Andoyer {
    fn distance(&self, p1: &GeodeticPoint, p2: &GeodeticPoint) -> Result<f64, ShorelineError> {
        let a = self.spheroid.a();
        let f = self.spheroid.flattening();

        let mid_lat = (p1.lat_rad() + p2.lat_rad()) / 2.0;
        let half_dlat = (p1.lat_rad() - p2.lat_rad()) / 2.0;
        let half_dlon = (p1.lon_rad() - p2.lon_rad()) / 2.0;

        let (sin_mid, cos_mid) = mid_lat.sin_cos();
        let (sin_dlat, cos_dlat) = half_dlat.sin_cos();
        let (sin_dlon, cos_dlon) = half_dlon.sin_cos();

        let s = sin_dlat * sin_dlat * cos_dlon * cos_dlon + cos_mid * cos_mid * sin_dlon * sin_dlon;
        let c = cos_dlat * cos_dlat * cos_dlon * cos_dlon + sin_mid * sin_mid * sin_dlon * sin_dlon;

        let omega = s.sqrt().atan2(c.sqrt());
        if omega == 0.0 {
            return Ok(0.0);
        }
        let spherical = 2.0 * omega * a;
        if s == 0.0 || c == 0.0 {
            return Ok(spherical);
        }

        let r = (s * c).sqrt() / omega;
        let h1 = (3.0 * r - 1.0) / (2.0 * c);
        let h2 = (3.0 * r + 1.0) / (2.0 * s);

        Ok(spherical
            * (1.0
                + f * (h1 * sin_mid * sin_mid * cos_dlat * cos_dlat
                    - h2 * cos_mid * cos_mid * sin_dlat * sin_dlat)))
    }

    fn model(&self) -> Spheroid {
        self.spheroid
    }
}

/// Thomas' formulae: second-order flattening correction, better accuracy than
/// [`Andoyer`] at comparable cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thomas {
    spheroid: Spheroid,
}

impl Thomas {
    /// Creates the strategy for the given ellipsoid.
    pub fn new(spheroid: Spheroid) -> Self {
        Self { spheroid }
    }
}

impl DistanceStrategy for Thomas {
    fn distance(&self, p1: &GeodeticPoint, p2: &GeodeticPoint) -> Result<f64, ShorelineError> {
        let a = self.spheroid.a();
        let f = self.spheroid.flattening();
        let one_minus_f = 1.0 - f;

        // Reduced latitudes.
        let theta1 = (one_minus_f * p1.lat_rad().tan()).atan();
        let theta2 = (one_minus_f * p2.lat_rad().tan()).atan();
        let theta_m = (theta1 + theta2) / 2.0;
        let d_theta_m = (theta2 - theta1) / 2.0;
        let half_dlon = (p2.lon_rad() - p1.lon_rad()) / 2.0;

        let (sin_theta_m, cos_theta_m) = theta_m.sin_cos();
        let (sin_d_theta_m, cos_d_theta_m) = d_theta_m.sin_cos();
        let sin_half_dlon = half_dlon.sin();

        let h = cos_theta_m * cos_theta_m - sin_d_theta_m * sin_d_theta_m;
        let l = sin_d_theta_m * sin_d_theta_m + h * sin_half_dlon * sin_half_dlon;
        let cos_d = 1.0 - 2.0 * l;
        let d = cos_d.clamp(-1.0, 1.0).acos();
        let sin_d = d.sin();

        let one_minus_l = 1.0 - l;
        if sin_d == 0.0 || l == 0.0 || one_minus_l == 0.0 {
            return Ok(a * d);
        }

        let u = 2.0 * sin_theta_m * sin_theta_m * cos_d_theta_m * cos_d_theta_m / one_minus_l;
        let v = 2.0 * sin_d_theta_m * sin_d_theta_m * cos_theta_m * cos_theta_m / l;
        let x = u + v;
        let y = u - v;
        let t = d / sin_d;
        let dd = 4.0 * t * t;
        let e = 2.0 * cos_d;
        let aa = dd * e;
        let bb = 2.0 * dd;
        let cc = t - (aa - e) / 2.0;

        let n1 = x * (aa + cc * x);
        let n2 = y * (bb + e * y);
        let n3 = dd * x * y;

        let delta1 = f * (t * x - y) / 4.0;
        let delta2 = f * f / 64.0 * (n1 - n2 + n3);

        Ok(a * sin_d * (t - delta1 + delta2))
    }

    fn model(&self) -> Spheroid {
        self.spheroid
    }
}

/// Vincenty's iterative solution of the inverse geodesic problem.
///
/// Sub-millimeter accuracy for most point pairs; fails with a
/// [`ShorelineError::Computation`] for nearly antipodal pairs where the
/// iteration does not converge. No silent fallback is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vincenty {
    spheroid: Spheroid,
}

impl Vincenty {
    /// Creates the strategy for the given ellipsoid.
    pub fn new(spheroid: Spheroid) -> Self {
        Self { spheroid }
    }
}

impl DistanceStrategy for Vincenty {
    fn distance(&self, p1: &GeodeticPoint, p2: &GeodeticPoint) -> Result<f64, ShorelineError> {
        let b = self.spheroid.b();
        let f = self.spheroid.flattening();

        let l = p2.lon_rad() - p1.lon_rad();
        let u1 = ((1.0 - f) * p1.lat_rad().tan()).atan();
        let u2 = ((1.0 - f) * p2.lat_rad().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let mut iteration = 0;
        let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m) = loop {
            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();
            if sin_sigma == 0.0 {
                // Coincident points.
                return Ok(0.0);
            }
            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            let sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            let cos_2sigma_m = if cos_sq_alpha == 0.0 {
                // Equatorial geodesic.
                0.0
            } else {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            };

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let previous = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            if (lambda - previous).abs() < VINCENTY_EPSILON {
                break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m);
            }
            iteration += 1;
            if iteration >= VINCENTY_MAX_ITERATIONS {
                return Err(ShorelineError::Computation(format!(
                    "vincenty inverse did not converge after {VINCENTY_MAX_ITERATIONS} \
                     iterations (nearly antipodal points?)"
                )));
            }
        };

        let u_sq = cos_sq_alpha * self.spheroid.second_eccentricity_squared();
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

        Ok(b * big_a * (sigma - delta_sigma))
    }

    fn model(&self) -> Spheroid {
        self.spheroid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn strategies() -> Vec<Box<dyn DistanceStrategy>> {
        vec![
            Box::new(Haversine::default()),
            Box::new(Andoyer::default()),
            Box::new(Thomas::default()),
            Box::new(Vincenty::default()),
        ]
    }

    #[test]
    fn zero_distance_for_coincident_points() {
        let p = GeodeticPoint::lonlat(12.3, -45.6);
        for strategy in strategies() {
            assert_eq!(strategy.distance(&p, &p).expect("converges"), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let p1 = GeodeticPoint::lonlat(2.35, 48.85);
        let p2 = GeodeticPoint::lonlat(-0.13, 51.5);
        for strategy in strategies() {
            let forward = strategy.distance(&p1, &p2).expect("converges");
            let backward = strategy.distance(&p2, &p1).expect("converges");
            assert_abs_diff_eq!(forward, backward, epsilon = 1e-6);
        }
    }

    #[test]
    fn one_degree_along_the_equator() {
        // The equator is a geodesic of radius a: 1° is exactly a·π/180.
        let p1 = GeodeticPoint::lonlat(0.0, 0.0);
        let p2 = GeodeticPoint::lonlat(1.0, 0.0);
        let expected = 6_378_137.0 * std::f64::consts::PI / 180.0;

        let vincenty = Vincenty::default().distance(&p1, &p2).expect("converges");
        assert_abs_diff_eq!(vincenty, expected, epsilon = 1e-3);

        let thomas = Thomas::default().distance(&p1, &p2).expect("converges");
        assert_abs_diff_eq!(thomas, expected, epsilon = 1e-3);

        let andoyer = Andoyer::default().distance(&p1, &p2).expect("converges");
        assert_abs_diff_eq!(andoyer, expected, epsilon = 1e-3);

        // Haversine runs on the mean-radius sphere instead.
        let haversine = Haversine::default().distance(&p1, &p2).expect("converges");
        assert_relative_eq!(haversine, expected, max_relative = 2e-3);
    }

    #[test]
    fn one_degree_along_the_meridian() {
        let p1 = GeodeticPoint::lonlat(0.0, 0.0);
        let p2 = GeodeticPoint::lonlat(0.0, 1.0);
        // Meridian arc from the equator to 1°N.
        let expected = 110_574.4;

        assert_abs_diff_eq!(
            Vincenty::default().distance(&p1, &p2).expect("converges"),
            expected,
            epsilon = 1.0
        );
        assert_abs_diff_eq!(
            Thomas::default().distance(&p1, &p2).expect("converges"),
            expected,
            epsilon = 10.0
        );
        assert_abs_diff_eq!(
            Andoyer::default().distance(&p1, &p2).expect("converges"),
            expected,
            epsilon = 25.0
        );
        assert_abs_diff_eq!(
            Haversine::default().distance(&p1, &p2).expect("converges"),
            expected,
            epsilon = 1000.0
        );
    }

    #[test]
    fn vincenty_surfaces_non_convergence() {
        // The classic nearly antipodal pair the iteration oscillates on.
        let p1 = GeodeticPoint::lonlat(0.0, 0.0);
        let p2 = GeodeticPoint::lonlat(179.5, 0.5);
        let result = Vincenty::default().distance(&p1, &p2);
        assert!(matches!(result, Err(ShorelineError::Computation(_))));
    }

    #[test]
    fn model_reports_the_bound_ellipsoid() {
        let custom = Spheroid::new(6_378_000.0, 6_356_000.0);
        assert_eq!(Andoyer::new(custom).model(), custom);
        assert_eq!(Thomas::new(custom).model(), custom);
        assert_eq!(Vincenty::new(custom).model(), custom);

        let sphere = Haversine::new(custom).model();
        assert_eq!(sphere.a(), sphere.b());
        assert_eq!(sphere.a(), custom.mean_radius());
    }
}
