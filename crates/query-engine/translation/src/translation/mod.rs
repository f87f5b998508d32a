//! Translate an ADQL query into SQL for the configured database.

pub mod error;
pub mod query;
pub mod spatial;
