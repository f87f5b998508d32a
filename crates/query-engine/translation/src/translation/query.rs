//! Translate an incoming ADQL query.

use query_engine_metadata::metadata::IndexConfig;
use query_engine_sql::sql;

use super::error::Error;
use super::spatial;

/// Translate an ADQL query into SQL for the configured database: parse it, lower its
/// geometry, then write it in the configured dialect.
pub fn translate(config: &IndexConfig, query: &str) -> Result<String, Error> {
    let result = translate_query(config, query);
    if let Err(err) = &result {
        tracing::error!(kind = err.kind(), "{}", err);
    }
    result
}

fn translate_query(config: &IndexConfig, query: &str) -> Result<String, Error> {
    let select = query_engine_parser::parse(query)?;
    let resolved = spatial::resolve(config, select)?;

    // log and return
    tracing::debug!("SQL AST: {:?}", resolved);
    let sql = sql::convert::select_to_sql(&resolved, config.dialect)?;
    tracing::debug!(sql = %sql.sql, "generated SQL");
    Ok(sql.sql)
}
