//! Closed vertex rings and point containment.

use crate::error::ShorelineTypesError;
use crate::point::Point2d;
use crate::rect::GeoRect;
use serde::{Deserialize, Serialize};

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points.
    pub fn triplet(p: &Point2d, q: &Point2d, r: &Point2d) -> Self {
        let v = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
        if v > 0.0 {
            Self::Clockwise
        } else if v < 0.0 {
            Self::Counterclockwise
        } else {
            Self::Collinear
        }
    }
}

/// Closed ring of 2d vertices in lon/lat degrees.
///
/// Closure is implicit: the last vertex connects back to the first, so rings
/// from sources that repeat the first vertex at the end and rings that do not
/// behave the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point2d>,
}

impl Ring {
    /// Creates a ring from its vertices. At least 3 vertices are required.
    pub fn new(points: Vec<Point2d>) -> Result<Self, ShorelineTypesError> {
        if points.len() < 3 {
            return Err(ShorelineTypesError::Conversion(format!(
                "a ring requires at least 3 vertices, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Vertices of the ring.
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the sides of the ring, including the implicit closing one.
    pub fn iter_segments(&self) -> impl Iterator<Item = (&Point2d, &Point2d)> {
        self.points.iter().enumerate().map(|(ix, start)| {
            let end = &self.points[(ix + 1) % self.points.len()];
            (start, end)
        })
    }

    /// Exact bounding box of the ring's own vertices.
    pub fn envelope(&self) -> Option<GeoRect> {
        GeoRect::from_points(self.points.iter())
    }

    /// Returns true if the `point` lies inside the ring or on one of its sides.
    ///
    /// Winding-number test, valid for simple rings of either orientation.
    pub fn contains(&self, point: &Point2d) -> bool {
        let mut wn = 0i64;

        for (a, b) in self.iter_segments() {
            match Orientation::triplet(a, b, point) {
                Orientation::Collinear => {
                    if on_segment(a, point, b) {
                        return true;
                    }
                }
                orientation => {
                    if a.y <= point.y {
                        // Upward crossing counts when the point is left of the side.
                        if b.y > point.y && orientation == Orientation::Counterclockwise {
                            wn += 1;
                        }
                    } else if b.y <= point.y && orientation == Orientation::Clockwise {
                        wn -= 1;
                    }
                }
            }
        }

        wn != 0
    }
}

fn on_segment(p: &Point2d, q: &Point2d, r: &Point2d) -> bool {
    let x_max = if p.x >= r.x { p.x } else { r.x };
    let x_min = if p.x <= r.x { p.x } else { r.x };
    let y_max = if p.y >= r.y { p.y } else { r.y };
    let y_min = if p.y <= r.y { p.y } else { r.y };

    q.x <= x_max && q.x >= x_min && q.y <= y_max && q.y >= y_min
}
