//! Metadata information regarding the target database and its spatial index.

pub mod database;
pub mod spatial;

// re-export without modules
pub use database::*;
pub use spatial::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything the query engine needs to know to translate a query: which SQL dialect to
/// produce and how sky positions are stored and indexed.
///
/// This is built once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexConfig {
    pub dialect: Dialect,
    /// The reference frame the catalog positions are stored in.
    pub catalog_frame: CoordinateSystem,
    pub columns: PositionColumns,
    pub spatial_index: SpatialIndex,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            dialect: Dialect::Oracle,
            catalog_frame: CoordinateSystem::Icrs,
            columns: PositionColumns::default(),
            spatial_index: SpatialIndex::default(),
        }
    }
}

impl IndexConfig {
    /// The same configuration, targeting another dialect.
    pub fn with_dialect(self, dialect: Dialect) -> Self {
        IndexConfig { dialect, ..self }
    }
}
