//! Ring clipping against a rectangular region.

use crate::point::Point2d;
use crate::rect::GeoRect;
use crate::ring::Ring;

/// Half-plane boundary of the clip rectangle.
#[derive(Debug, Clone, Copy)]
enum Edge {
    Left(f64),
    Right(f64),
    Bottom(f64),
    Top(f64),
}

impl Edge {
    fn is_inside(&self, p: &Point2d) -> bool {
        match *self {
            Edge::Left(x_min) => p.x >= x_min,
            Edge::Right(x_max) => p.x <= x_max,
            Edge::Bottom(y_min) => p.y >= y_min,
            Edge::Top(y_max) => p.y <= y_max,
        }
    }

    /// Intersection of segment `a -> b` with the boundary line.
    ///
    /// Called only when `a` and `b` are on opposite sides, so the divisor is
    /// never zero.
    fn intersection(&self, a: &Point2d, b: &Point2d) -> Point2d {
        match *self {
            Edge::Left(x) | Edge::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                Point2d::new(x, a.y + t * (b.y - a.y))
            }
            Edge::Bottom(y) | Edge::Top(y) => {
                let t = (y - a.y) / (b.y - a.y);
                Point2d::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Clips a ring to a rectangle (Sutherland–Hodgman).
///
/// Returns the part of the ring inside the rectangle, or `None` if nothing
/// remains. A ring that the rectangle cuts into several pieces comes back as a
/// single ring with degenerate bridge edges along the rectangle border;
/// containment for interior points is unaffected.
pub fn clip_ring(ring: &Ring, rect: &GeoRect) -> Option<Ring> {
    let edges = [
        Edge::Left(rect.x_min),
        Edge::Right(rect.x_max),
        Edge::Bottom(rect.y_min),
        Edge::Top(rect.y_max),
    ];

    let mut current = ring.points().to_vec();
    for edge in edges {
        if current.is_empty() {
            return None;
        }

        let mut clipped = Vec::with_capacity(current.len() + 4);
        for ix in 0..current.len() {
            let a = current[ix];
            let b = current[(ix + 1) % current.len()];
            match (edge.is_inside(&a), edge.is_inside(&b)) {
                (true, true) => clipped.push(b),
                (true, false) => clipped.push(edge.intersection(&a, &b)),
                (false, true) => {
                    clipped.push(edge.intersection(&a, &b));
                    clipped.push(b);
                }
                (false, false) => {}
            }
        }
        current = clipped;
    }

    Ring::new(current).ok()
}
