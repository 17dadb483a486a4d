//! Boundary data sources.
//!
//! The engine reads per-level polygon rings through the [`BoundarySource`]
//! trait. The shipped [`DirectorySource`] resolves the on-disk GSHHG layout
//! `<root>/<code>/GSHHS_<code>_L<level>.shp` and hands the file over to a
//! byte-level [`ShapeReader`]; parsing the shapefile format itself is outside
//! this crate. [`MemorySource`] serves rings straight from memory and is used
//! for synthetic data and tests.

use crate::error::ShorelineError;
use serde::{Deserialize, Serialize};
use shoreline_types::GeodeticPoint;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Resolution of the boundary data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// Crude resolution. Has no level 4 data.
    Crude,
    /// Low resolution.
    Low,
    /// Intermediate resolution.
    #[default]
    Intermediate,
    /// High resolution.
    High,
    /// Full resolution.
    Full,
}

impl Resolution {
    /// Single-letter code used in the data set directory layout.
    pub fn code(&self) -> char {
        match self {
            Resolution::Crude => 'c',
            Resolution::Low => 'l',
            Resolution::Intermediate => 'i',
            Resolution::High => 'h',
            Resolution::Full => 'f',
        }
    }
}

impl FromStr for Resolution {
    type Err = ShorelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crude" => Ok(Resolution::Crude),
            "low" => Ok(Resolution::Low),
            "intermediate" => Ok(Resolution::Intermediate),
            "high" => Ok(Resolution::High),
            "full" => Ok(Resolution::Full),
            _ => Err(ShorelineError::Configuration(format!(
                "resolution '{s}' is not defined"
            ))),
        }
    }
}

/// Polygon entity as produced by the byte-level reader.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    /// Start indices of the shape's parts. Empty for single-part shapes.
    pub part_starts: Vec<usize>,
    /// Ring vertices in lon/lat degrees.
    pub vertices: Vec<GeodeticPoint>,
}

/// One entity of a boundary data file.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRecord {
    /// Null geometry record. Treated as data corruption by the loader.
    Null,
    /// A shape of a non-polygon type; skipped by the loader.
    Other,
    /// A polygon ring.
    Polygon(PolygonShape),
}

/// Source of per-level boundary rings.
pub trait BoundarySource {
    /// Reads every entity of the given hierarchical level.
    ///
    /// Returns [`ShorelineError::SourceNotFound`] when the level has no
    /// backing data.
    fn read_level(
        &self,
        resolution: Resolution,
        level: u8,
    ) -> Result<Vec<ShapeRecord>, ShorelineError>;
}

/// Byte-level boundary file reader.
///
/// Implementations parse one file of the source format into entity records.
/// The engine treats the format as a black box.
pub trait ShapeReader: Send + Sync {
    /// Parses the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<ShapeRecord>, ShorelineError>;
}

/// Boundary source backed by the standard GSHHG directory layout.
pub struct DirectorySource<R> {
    root: PathBuf,
    reader: R,
}

impl<R: ShapeReader> DirectorySource<R> {
    /// Opens the data set rooted at `root`.
    ///
    /// Fails with [`ShorelineError::SourceNotFound`] if the root directory
    /// does not exist, before anything is loaded.
    pub fn open(root: impl Into<PathBuf>, reader: R) -> Result<Self, ShorelineError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ShorelineError::SourceNotFound(root));
        }
        Ok(Self { root, reader })
    }

    /// Path of the boundary file for the given resolution and level.
    pub fn level_path(&self, resolution: Resolution, level: u8) -> PathBuf {
        let code = resolution.code();
        self.root
            .join(code.to_string())
            .join(format!("GSHHS_{code}_L{level}.shp"))
    }
}

impl<R: ShapeReader> BoundarySource for DirectorySource<R> {
    fn read_level(
        &self,
        resolution: Resolution,
        level: u8,
    ) -> Result<Vec<ShapeRecord>, ShorelineError> {
        let path = self.level_path(resolution, level);
        if !path.is_file() {
            return Err(ShorelineError::SourceNotFound(path));
        }
        self.reader.read(&path)
    }
}

/// In-memory boundary source: one record list per level 1..=6.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    levels: [Option<Vec<ShapeRecord>>; 6],
}

impl MemorySource {
    /// Creates an empty source with no levels defined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines the records of a level. Levels outside 1..=6 are ignored.
    pub fn with_level(mut self, level: u8, records: Vec<ShapeRecord>) -> Self {
        if (1..=6).contains(&level) {
            self.levels[usize::from(level) - 1] = Some(records);
        }
        self
    }

    /// Defines a level as a list of plain single-part rings.
    pub fn with_rings(self, level: u8, rings: Vec<Vec<GeodeticPoint>>) -> Self {
        let records = rings
            .into_iter()
            .map(|vertices| {
                ShapeRecord::Polygon(PolygonShape {
                    part_starts: vec![0],
                    vertices,
                })
            })
            .collect();
        self.with_level(level, records)
    }
}

impl BoundarySource for MemorySource {
    fn read_level(
        &self,
        _resolution: Resolution,
        level: u8,
    ) -> Result<Vec<ShapeRecord>, ShorelineError> {
        let slot = (1..=6)
            .contains(&level)
            .then(|| self.levels[usize::from(level) - 1].clone())
            .flatten();
        slot.ok_or_else(|| {
            ShorelineError::SourceNotFound(PathBuf::from(format!("memory level {level}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopReader;

    impl ShapeReader for NoopReader {
        fn read(&self, _path: &Path) -> Result<Vec<ShapeRecord>, ShorelineError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn parses_resolution_names() {
        assert_eq!("crude".parse::<Resolution>().ok(), Some(Resolution::Crude));
        assert_eq!("full".parse::<Resolution>().ok(), Some(Resolution::Full));
        assert_eq!(Resolution::default(), Resolution::Intermediate);
        assert!(matches!(
            "medium".parse::<Resolution>(),
            Err(ShorelineError::Configuration(_))
        ));
    }

    #[test]
    fn builds_gshhg_paths() {
        let dir = std::env::temp_dir();
        let source = DirectorySource::open(&dir, NoopReader).expect("temp dir exists");
        let path = source.level_path(Resolution::Crude, 1);
        assert_eq!(path, dir.join("c").join("GSHHS_c_L1.shp"));
    }

    #[test]
    fn missing_root_directory_fails_on_open() {
        let result = DirectorySource::open("/definitely/not/a/real/dir", NoopReader);
        assert!(matches!(result, Err(ShorelineError::SourceNotFound(_))));
    }

    #[test]
    fn missing_level_file_fails_on_read() {
        let dir = std::env::temp_dir();
        let source = DirectorySource::open(&dir, NoopReader).expect("temp dir exists");
        let result = source.read_level(Resolution::Crude, 1);
        assert!(matches!(result, Err(ShorelineError::SourceNotFound(_))));
    }

    #[test]
    fn memory_source_serves_defined_levels_only() {
        let source = MemorySource::new().with_rings(
            2,
            vec![vec![
                GeodeticPoint::lonlat(0.0, 0.0),
                GeodeticPoint::lonlat(1.0, 0.0),
                GeodeticPoint::lonlat(0.0, 1.0),
            ]],
        );
        assert_eq!(
            source
                .read_level(Resolution::Intermediate, 2)
                .expect("level defined")
                .len(),
            1
        );
        assert!(matches!(
            source.read_level(Resolution::Intermediate, 3),
            Err(ShorelineError::SourceNotFound(_))
        ));
    }
}
