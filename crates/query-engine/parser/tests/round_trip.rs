//! Queries without geometry emitted for PostgreSQL parse back to the same tree.

use query_engine_metadata::metadata::Dialect;
use query_engine_parser::parse;
use query_engine_sql::sql::select_to_sql;

fn round_trip(query: &str) -> String {
    let select = parse(query).unwrap();
    let emitted = select_to_sql(&select, Dialect::Postgresql).unwrap().sql;
    let reparsed = parse(&emitted).unwrap_or_else(|err| panic!("{emitted}: {err}"));
    similar_asserts::assert_eq!(select, reparsed);
    emitted
}

#[test]
fn simple_select() {
    insta::assert_snapshot!(
        round_trip("select ra, dec from iraspsc where dec > -30 order by dec desc"),
        @"SELECT ra, dec FROM iraspsc WHERE (dec > -30) ORDER BY dec DESC"
    );
}

#[test]
fn nested_boolean_expressions() {
    insta::assert_snapshot!(
        round_trip("SELECT * FROM t WHERE NOT (a = 1 OR b <> 2) AND c BETWEEN 1 AND 2 OR d IS NULL"),
        @"SELECT * FROM t WHERE (((NOT ((a = 1) OR (b <> 2))) AND (c BETWEEN 1 AND 2)) OR (d IS NULL))"
    );
}

#[test]
fn arithmetic_keeps_literal_text() {
    insta::assert_snapshot!(
        round_trip("SELECT phot_g_mean_mag - 5. / 60. * -(parallax) AS m FROM g.s WHERE x % 2 = 0"),
        @"SELECT (phot_g_mean_mag - ((5. / 60.) * -(parallax))) AS m FROM g.s WHERE ((x % 2) = 0)"
    );
}

#[test]
fn functions_aggregates_and_grouping() {
    insta::assert_snapshot!(
        round_trip(
            "SELECT DISTINCT TOP 5 source, COUNT(DISTINCT id), log10(flux), ln(flux) \
             FROM s GROUP BY source HAVING COUNT(*) > 1"
        ),
        @"SELECT DISTINCT source, COUNT(DISTINCT id), LOG10(flux), LN(flux) FROM s GROUP BY source HAVING (COUNT(*) > 1) LIMIT 5"
    );
}

#[test]
fn strings_and_delimited_names() {
    insta::assert_snapshot!(
        round_trip(r#"SELECT "Mixed Case" FROM t WHERE name ILIKE 'o''brien%' || '_x'"#),
        @r#"SELECT "Mixed Case" FROM t WHERE (name ILIKE ('o''brien%' || '_x'))"#
    );
}

#[test]
fn joins_and_subqueries() {
    insta::assert_snapshot!(
        round_trip(
            "SELECT a.id FROM a LEFT JOIN b USING (id) \
             WHERE EXISTS (SELECT 1 FROM c WHERE c.id = a.id) AND a.id IN (SELECT id FROM d) \
             LIMIT 10 OFFSET 20"
        ),
        @"SELECT a.id FROM a LEFT OUTER JOIN b USING (id) WHERE (EXISTS (SELECT 1 FROM c WHERE (c.id = a.id)) AND (a.id IN (SELECT id FROM d))) LIMIT 10 OFFSET 20"
    );
}

#[test]
fn case_expressions() {
    insta::assert_snapshot!(
        round_trip("SELECT CASE WHEN a > 0 THEN 'pos' WHEN a < 0 THEN 'neg' ELSE 'zero' END FROM t"),
        @"SELECT CASE WHEN (a > 0) THEN 'pos' WHEN (a < 0) THEN 'neg' ELSE 'zero' END FROM t"
    );
}
