//! How sky positions are stored and indexed in the catalog tables.

use std::fmt;
use std::str::FromStr;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The deepest HTM level we are willing to encode. Ids at level 24 need 53 bits.
pub const MAX_HTM_LEVEL: u8 = 24;

/// Astronomical reference frames that may appear as coordinate system tags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoordinateSystem {
    Icrs,
    Fk5,
    Fk4,
    Galactic,
    Ecliptic,
}

impl CoordinateSystem {
    /// The canonical tag of the frame.
    pub fn tag(&self) -> &'static str {
        match self {
            CoordinateSystem::Icrs => "ICRS",
            CoordinateSystem::Fk5 => "FK5",
            CoordinateSystem::Fk4 => "FK4",
            CoordinateSystem::Galactic => "GALACTIC",
            CoordinateSystem::Ecliptic => "ECLIPTIC",
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A coordinate system tag that names no frame we know of.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coordinate system '{tag}'")]
pub struct UnknownCoordinateSystem {
    pub tag: String,
}

/// Parse a coordinate system tag. Only the first word counts, so STC-S style tags such as
/// `'ICRS GEOCENTER'` are accepted.
impl FromStr for CoordinateSystem {
    type Err = UnknownCoordinateSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let frame = s.split_whitespace().next().unwrap_or_default();
        match frame.to_ascii_uppercase().as_str() {
            "ICRS" => Ok(CoordinateSystem::Icrs),
            "FK5" | "J2000" => Ok(CoordinateSystem::Fk5),
            "FK4" | "B1950" => Ok(CoordinateSystem::Fk4),
            "GALACTIC" => Ok(CoordinateSystem::Galactic),
            "ECLIPTIC" => Ok(CoordinateSystem::Ecliptic),
            _ => Err(UnknownCoordinateSystem { tag: s.to_string() }),
        }
    }
}

/// Names of the columns holding a position.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct PositionColumns {
    /// Right ascension, in degrees.
    pub ra: String,
    /// Declination, in degrees.
    pub dec: String,
    /// Cartesian components of the unit vector of the position.
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Default for PositionColumns {
    fn default() -> Self {
        PositionColumns {
            ra: "ra".to_string(),
            dec: "dec".to_string(),
            x: "X".to_string(),
            y: "Y".to_string(),
            z: "Z".to_string(),
        }
    }
}

impl PositionColumns {
    /// All column names, with the name of the setting they come from.
    pub fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("ra", &self.ra),
            ("dec", &self.dec),
            ("x", &self.x),
            ("y", &self.y),
            ("z", &self.z),
        ]
    }
}

/// The spatial indexing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence, Serialize, Deserialize, JsonSchema)]
pub enum IndexingMode {
    /// Hierarchical Triangular Mesh.
    #[serde(rename = "HTM")]
    Htm,
}

/// How index cell ids are written into the index column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence, Serialize, Deserialize, JsonSchema)]
pub enum Encoding {
    /// The id as a plain integer.
    #[serde(rename = "BASE10")]
    Base10,
    /// The base-4 digits of the id, read as a decimal number.
    #[serde(rename = "BASE4")]
    Base4,
}

/// Limits on how finely a region is covered by index cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverSettings {
    /// The deepest mesh level the cover is refined to.
    pub max_cover_depth: u8,
    /// Refinement stops before the cover would need more id ranges than this.
    pub max_ranges: usize,
}

impl Default for CoverSettings {
    fn default() -> Self {
        CoverSettings {
            max_cover_depth: 12,
            max_ranges: 32,
        }
    }
}

/// The spatial index column and the scheme that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpatialIndex {
    pub mode: IndexingMode,
    /// The mesh level the index column is computed at.
    pub level: u8,
    pub column: String,
    pub encoding: Encoding,
    #[serde(flatten)]
    pub cover: CoverSettings,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        SpatialIndex {
            mode: IndexingMode::Htm,
            level: 20,
            column: "HTM20".to_string(),
            encoding: Encoding::Base10,
            cover: CoverSettings::default(),
        }
    }
}
