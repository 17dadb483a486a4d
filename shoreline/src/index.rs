//! The shoreline index: polygon records plus the pooled nearest-vertex tree.

use crate::dispatch::dispatch;
use crate::error::ShorelineError;
use crate::source::BoundarySource;
use crate::store::{self, LoadParameters, PolygonRecord};
use crate::strategy::DistanceStrategy;
use rstar::RTree;
use shoreline_types::math::normalize_angle;
use shoreline_types::{
    cartesian_to_geodetic, geodetic_to_cartesian, GeoRect, GeodeticPoint, Point2d, Point3d,
    Spheroid,
};

/// Immutable index of shoreline polygons.
///
/// Built once from a [`BoundarySource`]; afterwards every operation is a pure
/// read, so a single index can be queried from any number of threads without
/// coordination. There is no way to update or remove loaded geometry.
pub struct ShorelineIndex {
    /// Sorted by descending level; the mask scan takes the first match.
    records: Vec<PolygonRecord>,
    rtree: RTree<[f64; 3]>,
    spheroid: Spheroid,
    bbox: Option<GeoRect>,
}

impl ShorelineIndex {
    /// Loads the selected levels from the source and builds the index.
    ///
    /// Any failure aborts the whole construction: no partial index is ever
    /// observable.
    pub fn load(
        source: &impl BoundarySource,
        params: LoadParameters,
    ) -> Result<Self, ShorelineError> {
        params.validate()?;
        let spheroid = Spheroid::WGS84;
        let (records, pooled) = store::load(source, &params, &spheroid)?;

        log::debug!(
            "shoreline index built: {} polygon(s), {} pooled vertices",
            records.len(),
            pooled.len()
        );

        Ok(Self {
            records,
            rtree: RTree::bulk_load(pooled.iter().map(|p| [p.x, p.y, p.z]).collect()),
            spheroid,
            bbox: params.normalized_bbox(),
        })
    }

    /// Number of pooled coastline vertices.
    pub fn points(&self) -> usize {
        self.rtree.size()
    }

    /// Number of polygon records.
    pub fn polygons(&self) -> usize {
        self.records.len()
    }

    /// Loaded polygon records, highest level first.
    pub fn records(&self) -> &[PolygonRecord] {
        &self.records
    }

    /// The clip region the index was built with, if any.
    pub fn bbox(&self) -> Option<&GeoRect> {
        self.bbox.as_ref()
    }

    /// The reference ellipsoid of the pooled cartesian vertices.
    pub fn spheroid(&self) -> Spheroid {
        self.spheroid
    }

    /// Level of the highest-level polygon containing the point, or 0 if the
    /// point lies outside all of them (open ocean).
    ///
    /// Records are scanned in descending level order and the first match wins,
    /// so a point inside both a level 1 and a nested level 3 polygon reports
    /// level 3.
    pub fn mask(&self, lon: f64, lat: f64) -> u8 {
        let point = Point2d::new(normalize_angle(lon, -180.0, 360.0), lat);

        for record in &self.records {
            if record.envelope().contains(&point) && record.ring().contains(&point) {
                return record.level();
            }
        }
        0
    }

    /// Coordinates of the pooled coastline vertex nearest to the point.
    ///
    /// This is the nearest known *vertex*, not the nearest point on a boundary
    /// edge. `None` if the index holds no vertices.
    pub fn nearest(&self, lon: f64, lat: f64) -> Option<GeodeticPoint> {
        let ecef = geodetic_to_cartesian(&GeodeticPoint::lonlat(lon, lat), &self.spheroid);
        let found = self.rtree.nearest_neighbor(&[ecef.x, ecef.y, ecef.z])?;
        Some(cartesian_to_geodetic(
            &Point3d::new(found[0], found[1], found[2]),
            &self.spheroid,
        ))
    }

    /// Distance in meters from the point to the nearest coastline vertex,
    /// computed with the given strategy.
    pub fn distance_to_nearest(
        &self,
        lon: f64,
        lat: f64,
        strategy: &dyn DistanceStrategy,
    ) -> Result<f64, ShorelineError> {
        let nearest = self.nearest(lon, lat).ok_or_else(|| {
            ShorelineError::Computation("the index holds no coastline vertices".into())
        })?;
        strategy.distance(&GeodeticPoint::lonlat(lon, lat), &nearest)
    }

    /// Classifies a batch of points. See [`ShorelineIndex::mask`].
    ///
    /// `num_threads == 0` uses all available hardware threads.
    pub fn mask_batch(
        &self,
        lon: &[f64],
        lat: &[f64],
        num_threads: usize,
    ) -> Result<Vec<i8>, ShorelineError> {
        check_batch_input(lon, lat)?;
        let mut result = vec![0i8; lon.len()];
        dispatch(&mut result, num_threads, |ix, slot| {
            *slot = self.mask(lon[ix], lat[ix]) as i8;
            Ok(())
        })?;
        Ok(result)
    }

    /// Nearest coastline vertex for a batch of points, as parallel longitude
    /// and latitude arrays. See [`ShorelineIndex::nearest`].
    pub fn nearest_batch(
        &self,
        lon: &[f64],
        lat: &[f64],
        num_threads: usize,
    ) -> Result<(Vec<f64>, Vec<f64>), ShorelineError> {
        check_batch_input(lon, lat)?;
        let mut result = vec![(0f64, 0f64); lon.len()];
        dispatch(&mut result, num_threads, |ix, slot| {
            let point = self.nearest(lon[ix], lat[ix]).ok_or_else(|| {
                ShorelineError::Computation("the index holds no coastline vertices".into())
            })?;
            *slot = (point.lon(), point.lat());
            Ok(())
        })?;
        Ok(result.into_iter().unzip())
    }

    /// Distance to the nearest coastline vertex for a batch of points, in
    /// meters. See [`ShorelineIndex::distance_to_nearest`].
    pub fn distance_to_nearest_batch(
        &self,
        lon: &[f64],
        lat: &[f64],
        strategy: &dyn DistanceStrategy,
        num_threads: usize,
    ) -> Result<Vec<f64>, ShorelineError> {
        check_batch_input(lon, lat)?;
        let mut result = vec![0f64; lon.len()];
        dispatch(&mut result, num_threads, |ix, slot| {
            *slot = self.distance_to_nearest(lon[ix], lat[ix], strategy)?;
            Ok(())
        })?;
        Ok(result)
    }
}

fn check_batch_input(lon: &[f64], lat: &[f64]) -> Result<(), ShorelineError> {
    if lon.len() != lat.len() {
        return Err(ShorelineError::InputValidation(format!(
            "lon and lat must have the same length, got {} and {}",
            lon.len(),
            lat.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::strategy::Andoyer;
    use approx::assert_abs_diff_eq;

    fn square_index() -> ShorelineIndex {
        // A single level-1 ring forming the square (0,0)-(0,10)-(10,10)-(10,0).
        let source = MemorySource::new().with_rings(
            1,
            vec![vec![
                GeodeticPoint::lonlat(0.0, 0.0),
                GeodeticPoint::lonlat(0.0, 10.0),
                GeodeticPoint::lonlat(10.0, 10.0),
                GeodeticPoint::lonlat(10.0, 0.0),
                GeodeticPoint::lonlat(0.0, 0.0),
            ]],
        );
        let params = LoadParameters {
            levels: Some(vec![1]),
            ..LoadParameters::default()
        };
        ShorelineIndex::load(&source, params).expect("loads")
    }

    #[test]
    fn mask_classifies_the_square() {
        let index = square_index();
        assert_eq!(index.mask(5.0, 5.0), 1);
        assert_eq!(index.mask(50.0, 50.0), 0);
        assert_eq!(index.mask(0.0, 5.0), 1);
        // Longitude is normalized before the containment test.
        assert_eq!(index.mask(365.0, 5.0), 1);
    }

    #[test]
    fn counts_the_loaded_geometry() {
        let index = square_index();
        assert_eq!(index.polygons(), 1);
        assert_eq!(index.points(), 5);
    }

    #[test]
    fn nearest_returns_a_corner() {
        let index = square_index();
        let nearest = index.nearest(5.0, 5.0).expect("non-empty index");
        let corners = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];
        assert!(
            corners.iter().any(|&(lon, lat)| {
                (nearest.lon() - lon).abs() < 1e-7 && (nearest.lat() - lat).abs() < 1e-7
            }),
            "unexpected nearest vertex: {nearest:?}"
        );
    }

    #[test]
    fn distance_is_zero_on_an_indexed_vertex() {
        let index = square_index();
        let strategy = Andoyer::default();
        // The nearest vertex survives the ECEF round trip up to float noise.
        let on_vertex = index
            .distance_to_nearest(0.0, 10.0, &strategy)
            .expect("computes");
        assert_abs_diff_eq!(on_vertex, 0.0, epsilon = 1e-6);

        let off_vertex = index
            .distance_to_nearest(5.0, 5.0, &strategy)
            .expect("computes");
        assert!(off_vertex > 1000.0);
    }

    #[test]
    fn empty_index_has_no_nearest_vertex() {
        let source = MemorySource::new().with_rings(1, vec![]);
        let params = LoadParameters {
            levels: Some(vec![1]),
            ..LoadParameters::default()
        };
        let index = ShorelineIndex::load(&source, params).expect("loads");
        assert!(index.nearest(0.0, 0.0).is_none());
        assert!(matches!(
            index.distance_to_nearest(0.0, 0.0, &Andoyer::default()),
            Err(ShorelineError::Computation(_))
        ));
    }

    #[test]
    fn batch_input_must_have_equal_lengths() {
        let index = square_index();
        let result = index.mask_batch(&[0.0, 1.0], &[0.0], 1);
        assert!(matches!(result, Err(ShorelineError::InputValidation(_))));
    }
}
