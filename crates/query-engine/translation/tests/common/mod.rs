use std::fs;
use std::path::PathBuf;

use query_engine_translation::translation;

/// Load the configuration of a golden test and translate its query.
pub async fn test_translation(testname: &str) -> Result<String, translation::error::Error> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);

    let parsed_configuration = adql_parser_configuration::parse_configuration(&directory)
        .await
        .unwrap();
    let configuration = adql_parser_configuration::make_runtime_configuration(
        parsed_configuration,
        adql_parser_configuration::environment::FixedEnvironment::from([(
            "ADQL_PARSER_DIALECT".into(),
            "sqlite".into(),
        )]),
    )
    .unwrap();

    let request = fs::read_to_string(directory.join("request.adql")).unwrap();

    translation::query::translate(&configuration.index, request.trim())
}

/// Pretty print generated SQL, for failure messages.
pub fn pretty(sql: &str) -> String {
    sqlformat::format(
        sql,
        &sqlformat::QueryParams::None,
        sqlformat::FormatOptions::default(),
    )
}
