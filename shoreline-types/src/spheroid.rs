//! Reference ellipsoid model.

use serde::{Deserialize, Serialize};

/// Reference ellipsoid defined by its semi-major and semi-minor axes in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spheroid {
    a: f64,
    b: f64,
}

impl Spheroid {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Spheroid {
        a: 6_378_137.0,
        b: 6_356_752.3142,
    };

    /// Creates an ellipsoid from its semi-major axis `a` and semi-minor axis `b`.
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Semi-major (equatorial) axis in meters.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Semi-minor (polar) axis in meters.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Flattening `(a - b) / a`.
    pub fn flattening(&self) -> f64 {
        (self.a - self.b) / self.a
    }

    /// First eccentricity squared `(a² - b²) / a²`.
    pub fn eccentricity_squared(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.a * self.a)
    }

    /// Second eccentricity squared `(a² - b²) / b²`.
    pub fn second_eccentricity_squared(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.b * self.b)
    }

    /// Mean radius `(2a + b) / 3` of the representative sphere.
    pub fn mean_radius(&self) -> f64 {
        (2.0 * self.a + self.b) / 3.0
    }
}

impl Default for Spheroid {
    fn default() -> Self {
        Self::WGS84
    }
}
