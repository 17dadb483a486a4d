//! Shoreline classifies geographic points against a hierarchy of shoreline
//! polygons and computes geodesic distances to the nearest coastline vertex,
//! at batch scale.
//!
//! The entry point is [`ShorelineIndex`]: it is built once from a
//! [`BoundarySource`](source::BoundarySource) (the on-disk GSHHG layout via
//! [`DirectorySource`](source::DirectorySource), or in-memory rings via
//! [`MemorySource`](source::MemorySource)) and is immutable afterwards, so it
//! can be shared freely between threads.
//!
//! ```
//! use shoreline::source::MemorySource;
//! use shoreline::store::LoadParameters;
//! use shoreline::strategy::Andoyer;
//! use shoreline::ShorelineIndex;
//! use shoreline_types::GeodeticPoint;
//!
//! let source = MemorySource::new().with_rings(
//!     1,
//!     vec![vec![
//!         GeodeticPoint::lonlat(0.0, 0.0),
//!         GeodeticPoint::lonlat(0.0, 10.0),
//!         GeodeticPoint::lonlat(10.0, 10.0),
//!         GeodeticPoint::lonlat(10.0, 0.0),
//!         GeodeticPoint::lonlat(0.0, 0.0),
//!     ]],
//! );
//! let params = LoadParameters {
//!     levels: Some(vec![1]),
//!     ..LoadParameters::default()
//! };
//! let index = ShorelineIndex::load(&source, params)?;
//!
//! assert_eq!(index.mask(5.0, 5.0), 1);
//! assert_eq!(index.mask(-150.0, 0.0), 0);
//!
//! let meters = index.distance_to_nearest(5.0, 5.0, &Andoyer::default())?;
//! assert!(meters > 0.0);
//! # Ok::<(), shoreline::ShorelineError>(())
//! ```
//!
//! Batch variants of the three queries ([`ShorelineIndex::mask_batch`],
//! [`ShorelineIndex::nearest_batch`],
//! [`ShorelineIndex::distance_to_nearest_batch`]) fan the work out over a
//! fixed number of worker threads in a fork-join pattern and fill
//! pre-allocated output arrays.

pub mod dispatch;
pub mod error;
pub mod index;
pub mod source;
pub mod store;
pub mod strategy;

pub use error::ShorelineError;
pub use index::ShorelineIndex;
pub use shoreline_types;
