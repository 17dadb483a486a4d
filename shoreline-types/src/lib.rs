//! Geodetic and cartesian primitives used by the `shoreline` query engine.
//!
//! The crate provides the value types the engine is built from: the reference
//! [`Spheroid`](spheroid::Spheroid), geodetic and ECEF points with the
//! transforms between them, axis-aligned [`GeoRect`](rect::GeoRect) boxes,
//! closed vertex [`Ring`](ring::Ring)s with boundary-inclusive containment,
//! and rectangle clipping for bounding-box selection.
//!
//! All angle inputs are degrees unless a function name says otherwise, and no
//! type here holds hidden global state: ellipsoid parameters are always passed
//! explicitly.

pub mod clip;
pub mod error;
pub mod math;
pub mod point;
pub mod rect;
pub mod ring;
pub mod spheroid;
pub mod transform;

pub use clip::clip_ring;
pub use error::ShorelineTypesError;
pub use point::{GeodeticPoint, Point2d, Point3d};
pub use rect::GeoRect;
pub use ring::{Orientation, Ring};
pub use spheroid::Spheroid;
pub use transform::{cartesian_to_geodetic, geodetic_to_cartesian};
