mod common;

use query_engine_metadata::metadata::{Dialect, IndexConfig};
use query_engine_translation::translation::error::Error;
use query_engine_translation::translation::query::translate;
use query_engine_translation::translation::spatial::SpatialErrorKind;

#[tokio::test]
async fn contains_ecliptic_polygon() {
    let sql = common::test_translation("contains_ecliptic_polygon")
        .await
        .unwrap();
    let pretty = common::pretty(&sql);
    assert!(sql.starts_with("SELECT source_id FROM gaia.source WHERE (("), "{pretty}");
    assert!(
        sql.contains("HTM20 BETWEEN") || sql.contains("HTM20 = "),
        "{pretty}"
    );
    assert!(sql.contains(" AND "), "{pretty}");
    assert!(sql.contains("(X * "), "{pretty}");
    assert!(sql.ends_with(" FETCH FIRST 100 ROWS ONLY"), "{pretty}");
}

#[tokio::test]
async fn distance_order_by() {
    let sql = common::test_translation("distance_order_by").await.unwrap();
    let pretty = common::pretty(&sql);
    assert!(sql.contains("DEGREES(ASIN(SQRT("), "{pretty}");
    assert!(sql.contains(" < (5. / 60.))"), "{pretty}");
    assert!(sql.ends_with(" ORDER BY ang_sep ASC"), "{pretty}");
    assert!(!sql.contains("HTM20"), "{pretty}");
}

#[tokio::test]
async fn distance_arity() {
    match common::test_translation("distance_arity").await {
        Err(Error::Spatial(err)) => {
            assert_eq!(err.kind, SpatialErrorKind::ArityMismatch);
            assert!(err.to_string().contains("got 3"), "{err}");
        }
        other => panic!("expected an arity mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_coordinate_system() {
    match common::test_translation("unknown_coordinate_system").await {
        Err(Error::Spatial(err)) => {
            assert_eq!(err.kind, SpatialErrorKind::UnknownCoordSystem);
            assert!(err.to_string().contains("'MARS'"), "{err}");
        }
        other => panic!("expected an unknown coordinate system, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_select_list() {
    match common::test_translation("missing_select_list").await {
        Err(Error::Syntax(err)) => assert_eq!(err.offset, 7),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[tokio::test]
async fn cone_search_mysql() {
    let sql = common::test_translation("cone_search_mysql").await.unwrap();
    let pretty = common::pretty(&sql);
    assert!(
        sql.starts_with("SELECT o.source_id, o.ra, o.dec FROM gaia.source AS o WHERE "),
        "{pretty}"
    );
    assert!(sql.contains("o.HTM20"), "{pretty}");
    assert!(sql.contains("(o.X * "), "{pretty}");
}

#[tokio::test]
async fn galactic_catalog_sqlite() {
    let sql = common::test_translation("galactic_catalog_sqlite")
        .await
        .unwrap();
    let pretty = common::pretty(&sql);
    assert!(sql.starts_with("SELECT glon, glat FROM survey WHERE "), "{pretty}");
    assert!(sql.contains("htm16"), "{pretty}");
    assert!(sql.contains("(cx * "), "{pretty}");
    assert!(sql.ends_with(" LIMIT 5"), "{pretty}");
}

#[tokio::test]
async fn iraspsc_ecliptic_polygon() {
    let sql = common::test_translation("iraspsc_ecliptic_polygon")
        .await
        .unwrap();
    let pretty = common::pretty(&sql);
    assert!(sql.starts_with("SELECT ra, dec FROM iraspsc WHERE (("), "{pretty}");
    let ranges = sql.matches("HTM20 BETWEEN").count() + sql.matches("HTM20 = ").count();
    let max_ranges = IndexConfig::default().spatial_index.cover.max_ranges;
    assert!((1..=max_ranges).contains(&ranges), "{pretty}");
    // one half-space per polygon edge
    assert_eq!(sql.matches("(X * ").count(), 4, "{pretty}");
    assert!(sql.ends_with(" ORDER BY dec DESC"), "{pretty}");
}

#[tokio::test]
async fn star_with_distance_oracle() {
    let sql = common::test_translation("star_with_distance_oracle")
        .await
        .unwrap();
    let pretty = common::pretty(&sql);
    assert!(sql.starts_with("SELECT gaiadr3.gaia_source.*, (2 * "), "{pretty}");
    assert!(sql.contains(" AS ang_sep FROM gaiadr3.gaia_source WHERE "), "{pretty}");
    assert!(sql.contains("(parallax IS NOT NULL)"), "{pretty}");
    assert!(!sql.contains("DEGREES("), "{pretty}");
    assert!(sql.ends_with(" ORDER BY ang_sep ASC"), "{pretty}");
}

#[test]
fn lowered_spatial_sql_translates_to_itself() {
    let config = IndexConfig::default().with_dialect(Dialect::Postgresql);
    for query in [
        "SELECT ra, dec FROM iraspsc WHERE CONTAINS(POINT('ICRS', ra, dec), POLYGON('ECLIPTIC', 233.56,34.567, 233.56,33.567, 234.56,33.567, 234.56,34.567)) = 1 ORDER BY dec DESC",
        "SELECT *, DISTANCE(81.28, -69.78, ra, dec) AS ang_sep FROM gaiadr3.gaia_source WHERE DISTANCE(81.28,-69.78,ra,dec) < 5./60. AND parallax IS NOT NULL ORDER BY ang_sep ASC",
        "SELECT o.source_id, CONTAINS(POINT('ICRS', o.ra, o.dec), CIRCLE('GALACTIC', 280.4, -32.9, 1.5)) AS inside FROM gaia.source AS o WHERE 1 = INTERSECTS(CIRCLE('ICRS', 10, 20, 0.5), POINT('ICRS', o.ra, o.dec))",
    ] {
        let lowered = translate(&config, query).unwrap();
        let again = translate(&config, &lowered)
            .unwrap_or_else(|err| panic!("{}: {err}", common::pretty(&lowered)));
        similar_asserts::assert_eq!(lowered, again);
    }
}
