//! Loading of per-level boundary rings into immutable polygon records.

use crate::error::ShorelineError;
use crate::source::{BoundarySource, Resolution, ShapeRecord};
use shoreline_types::math::normalize_angle;
use shoreline_types::{
    clip_ring, geodetic_to_cartesian, GeoRect, GeodeticPoint, Point2d, Point3d, Ring, Spheroid,
};

/// Hierarchical levels of the boundary data set.
pub const LEVELS: std::ops::RangeInclusive<u8> = 1..=6;

/// One loaded polygon: ring geometry, its exact envelope and its level.
#[derive(Debug, Clone)]
pub struct PolygonRecord {
    ring: Ring,
    envelope: GeoRect,
    level: u8,
}

impl PolygonRecord {
    /// Ring geometry of the polygon.
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Exact bounding box of the ring's vertices.
    pub fn envelope(&self) -> &GeoRect {
        &self.envelope
    }

    /// Hierarchical level, 1..=6.
    pub fn level(&self) -> u8 {
        self.level
    }
}

/// Construction parameters of a [`crate::ShorelineIndex`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct LoadParameters {
    /// Data set resolution to load. Defaults to intermediate.
    pub resolution: Resolution,
    /// Subset of levels to load; `None` loads all of 1..=6.
    pub levels: Option<Vec<u8>>,
    /// Region to clip the loaded geometry to; `None` loads the whole globe.
    pub bbox: Option<GeoRect>,
}

impl LoadParameters {
    pub(crate) fn validate(&self) -> Result<(), ShorelineError> {
        if let Some(levels) = &self.levels {
            if let Some(&level) = levels.iter().find(|level| !LEVELS.contains(level)) {
                return Err(ShorelineError::Configuration(format!(
                    "level {level} is outside of [1, 6]"
                )));
            }
        }
        Ok(())
    }

    /// Clip region with its longitudes wrapped to `[-180, 180)`.
    pub(crate) fn normalized_bbox(&self) -> Option<GeoRect> {
        self.bbox.map(|bbox| GeoRect {
            x_min: normalize_angle(bbox.x_min, -180.0, 360.0),
            y_min: bbox.y_min,
            x_max: normalize_angle(bbox.x_max, -180.0, 360.0),
            y_max: bbox.y_max,
        })
    }

    fn wants_level(&self, level: u8) -> bool {
        match &self.levels {
            Some(levels) => levels.contains(&level),
            None => true,
        }
    }
}

/// Loads every selected level from the source.
///
/// Returns the polygon records sorted by descending level (stable within one
/// level, so the mask scan is a first-match-wins priority scan) together with
/// the pooled ECEF vertices of the retained geometry.
pub(crate) fn load(
    source: &impl BoundarySource,
    params: &LoadParameters,
    spheroid: &Spheroid,
) -> Result<(Vec<PolygonRecord>, Vec<Point3d>), ShorelineError> {
    let bbox = params.normalized_bbox();
    let mut records = Vec::new();
    let mut pooled = Vec::new();

    for level in LEVELS {
        if !params.wants_level(level) {
            continue;
        }
        // No boundary between pond-in-island and island in crude resolution.
        if params.resolution == Resolution::Crude && level == 4 {
            continue;
        }

        let entities = source.read_level(params.resolution, level)?;
        // Level 5 at full resolution carries a known defect and must be patched.
        let patch = params.resolution == Resolution::Full && level == 5;

        let records_before = records.len();
        let pooled_before = pooled.len();
        for (ix, entity) in entities.iter().enumerate() {
            let shape = match entity {
                ShapeRecord::Null => {
                    return Err(ShorelineError::DataCorruption(format!(
                        "unable to read shape {ix} of level {level}"
                    )))
                }
                ShapeRecord::Other => continue,
                ShapeRecord::Polygon(shape) => shape,
            };
            if shape.part_starts.first().is_some_and(|&start| start != 0) {
                return Err(ShorelineError::DataCorruption(format!(
                    "shape {ix} of level {level} does not start at part 0"
                )));
            }
            if shape.vertices.is_empty() {
                continue;
            }

            let mut vertices: Vec<Point2d> = shape
                .vertices
                .iter()
                .map(|v| Point2d::new(v.lon(), v.lat()))
                .collect();
            let mut synthetic = 0;
            if patch && ix == 0 {
                // The patch drops three vertices; anything shorter cannot be
                // the Antarctic ice boundary.
                if vertices.len() < 4 {
                    return Err(ShorelineError::DataCorruption(format!(
                        "shape {ix} of level {level} has too few vertices ({}) to patch",
                        vertices.len()
                    )));
                }
                // Drop the two leading vertices and the trailing one, then
                // close the Antarctic ice boundary over the pole.
                vertices.rotate_left(2);
                vertices.truncate(vertices.len().saturating_sub(3));
                vertices.push(Point2d::new(180.0, -90.0));
                vertices.push(Point2d::new(0.0, -90.0));
                synthetic = 2;
            }

            let ring = Ring::new(vertices).map_err(|err| {
                ShorelineError::DataCorruption(format!("shape {ix} of level {level}: {err}"))
            })?;

            let (ring, pool_len) = match &bbox {
                Some(bbox) => match clip_ring(&ring, bbox) {
                    Some(fragment) => {
                        let len = fragment.len();
                        (fragment, len)
                    }
                    None => continue,
                },
                // The synthetic closing vertices are not coastline; they join
                // the ring for containment but stay out of the vertex pool.
                None => {
                    let len = ring.len() - synthetic;
                    (ring, len)
                }
            };

            let envelope = ring.envelope().ok_or_else(|| {
                ShorelineError::DataCorruption(format!("shape {ix} of level {level} is empty"))
            })?;

            pooled.extend(ring.points()[..pool_len].iter().map(|p| {
                geodetic_to_cartesian(&GeodeticPoint::lonlat(p.x, p.y), spheroid)
            }));
            records.push(PolygonRecord {
                ring,
                envelope,
                level,
            });
        }

        log::debug!(
            "level {level}: {} polygon(s), {} pooled vertices",
            records.len() - records_before,
            pooled.len() - pooled_before,
        );
    }

    // Explicit mask priority: higher levels are tested first. The sort is
    // stable, so source order within a level is preserved.
    records.sort_by(|a, b| b.level.cmp(&a.level));

    Ok((records, pooled))
}
