use axum::http::StatusCode;

use adql_parser::routes::ParseResponse;
use tests_common::requests;
use tests_common::router::create_router;

#[tokio::test]
async fn translates_a_cone_search() {
    let router = create_router().await;
    let (status, response) = requests::post_parse(
        router,
        "SELECT TOP 5 source_id FROM gaia.source WHERE 1 = CONTAINS(POINT('ICRS', ra, dec), CIRCLE('ICRS', 266.4, -29.0, 0.5))",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.error, "");
    assert!(response.parsed.starts_with("SELECT source_id FROM gaia.source WHERE "), "{}", response.parsed);
    assert!(response.parsed.contains("HTM20"), "{}", response.parsed);
    assert!(response.parsed.ends_with(" FETCH FIRST 5 ROWS ONLY"), "{}", response.parsed);
}

#[tokio::test]
async fn qualifies_a_star_beside_a_distance() {
    let router = create_router().await;
    let (status, response) = requests::post_parse(
        router,
        "SELECT *, DISTANCE(81.28, -69.78, ra, dec) AS ang_sep FROM gaiadr3.gaia_source WHERE DISTANCE(81.28,-69.78,ra,dec) < 5./60. AND phot_g_mean_mag < 20.5 AND parallax IS NOT NULL ORDER BY ang_sep ASC",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.error, "");
    assert!(
        response.parsed.starts_with("SELECT gaiadr3.gaia_source.*, "),
        "{}",
        response.parsed
    );
}

#[tokio::test]
async fn reports_translation_failures_in_the_body() {
    let router = create_router().await;
    let (status, response) = requests::post_parse(router, "SELECT FROM WHERE").await;
    assert_eq!(status, StatusCode::OK);
    similar_asserts::assert_eq!(
        response,
        ParseResponse {
            error: "syntax error at offset 7: expected select list, found FROM".to_string(),
            parsed: String::new(),
        }
    );
}

#[tokio::test]
async fn reports_spatial_failures_in_the_body() {
    let router = create_router().await;
    let (_, response) =
        requests::post_parse(router, "SELECT DISTANCE(1, 2, 3) FROM t").await;
    insta::assert_snapshot!(
        response.error,
        @"arity mismatch: DISTANCE expects 4 arguments (ra1, dec1, ra2, dec2), got 3"
    );
    assert_eq!(response.parsed, "");
}

#[tokio::test]
async fn rejects_malformed_requests() {
    let router = create_router().await;
    let client = axum_test_helper::TestClient::new(router);
    let res = client
        .post("/parse")
        .body("{\"question\": 42}")
        .header("Content-Type", "application/json")
        .send()
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn health_check() {
    let router = create_router().await;
    let client = axum_test_helper::TestClient::new(router);
    let res = client.get("/health").send().await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_count_requests_and_failures() {
    let router = create_router().await;
    requests::post_parse(router.clone(), "SELECT ra FROM t").await;
    requests::post_parse(router.clone(), "SELECT 'oops FROM t").await;

    let client = axum_test_helper::TestClient::new(router);
    let res = client.get("/metrics").send().await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await;
    assert!(body.contains("adql_parser_translate_total 2"), "{body}");
    assert!(
        body.contains("adql_parser_translate_errors_total{kind=\"lex\"} 1"),
        "{body}"
    );
    assert!(
        body.contains("adql_parser_translate_duration_seconds_count 2"),
        "{body}"
    );
}
