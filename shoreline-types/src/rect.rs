//! Axis-aligned bounding boxes in lon/lat degrees.

use nalgebra::{Point2, Scalar};
use num_traits::Num;
use serde::{Deserialize, Serialize};

/// Axis-aligned box over lon/lat coordinates: polygon envelope or clip region.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRect<N = f64> {
    /// Minimum longitude.
    pub x_min: N,
    /// Minimum latitude.
    pub y_min: N,
    /// Maximum longitude.
    pub x_max: N,
    /// Maximum latitude.
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd + Scalar> GeoRect<N> {
    /// Creates a new rectangle from its corner coordinates.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Exact bounding box of the given points. `None` for an empty iterator.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point2<N>>) -> Option<Self> {
        let first = points.next()?;
        let mut x_min = first.x;
        let mut y_min = first.y;
        let mut x_max = first.x;
        let mut y_max = first.y;

        for p in points {
            if x_min > p.x {
                x_min = p.x;
            }
            if y_min > p.y {
                y_min = p.y;
            }
            if x_max < p.x {
                x_max = p.x;
            }
            if y_max < p.y {
                y_max = p.y;
            }
        }

        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Returns true if the point lies inside the rectangle or on its border.
    pub fn contains(&self, point: &Point2<N>) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }

    /// Returns true if the rectangles have at least one common point.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }
}
