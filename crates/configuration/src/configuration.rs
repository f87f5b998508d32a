//! Configuration for the service.

use query_engine_metadata::metadata;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration'. Separating the two keeps the on-disk format, and its
/// evolution, out of the translation logic.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub index: metadata::IndexConfig,
}
