//! Angle arithmetic helpers.

/// Computes the remainder of `x / y` with the same sign as `y`.
///
/// Unlike `f64::rem_euclid`, the result follows the divisor's sign, which is
/// what angle wrapping over an arbitrary circle requires. Total for all finite
/// inputs.
pub fn remainder(x: f64, y: f64) -> f64 {
    let result = x % y;
    if result != 0.0 && (result < 0.0) != (y < 0.0) {
        result + y
    } else {
        result
    }
}

/// Reduces the angle `x` to the range `[min, min + circle)`.
///
/// Idempotent: normalizing an already normalized angle returns it unchanged.
pub fn normalize_angle(x: f64, min: f64, circle: f64) -> f64 {
    remainder(x - min, circle) + min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_follows_divisor_sign() {
        assert_eq!(remainder(7.0, 3.0), 1.0);
        assert_eq!(remainder(-7.0, 3.0), 2.0);
        assert_eq!(remainder(7.0, -3.0), -2.0);
        assert_eq!(remainder(6.0, 3.0), 0.0);
    }

    #[test]
    fn normalize_wraps_longitudes() {
        assert_eq!(normalize_angle(0.0, -180.0, 360.0), 0.0);
        assert_eq!(normalize_angle(180.0, -180.0, 360.0), -180.0);
        assert_eq!(normalize_angle(-180.0, -180.0, 360.0), -180.0);
        assert_eq!(normalize_angle(360.0, -180.0, 360.0), 0.0);
        assert_eq!(normalize_angle(190.0, -180.0, 360.0), -170.0);
        assert_eq!(normalize_angle(-190.0, -180.0, 360.0), 170.0);
        assert_eq!(normalize_angle(540.0, -180.0, 360.0), -180.0);
    }

    #[test]
    fn normalize_is_idempotent() {
        for x in [-720.0, -359.5, -180.0, -0.1, 0.0, 17.3, 179.999, 180.0, 1234.5] {
            let once = normalize_angle(x, -180.0, 360.0);
            let twice = normalize_angle(once, -180.0, 360.0);
            assert_eq!(once, twice, "not idempotent for {x}");
            assert!((-180.0..180.0).contains(&once));
        }
    }
}
