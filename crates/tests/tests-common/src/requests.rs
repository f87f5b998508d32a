//! Requests against a router.

use axum::http::StatusCode;
use axum_test_helper::TestClient;

use adql_parser::routes::{ParseRequest, ParseResponse};

/// Post one query to `/parse` and decode the response.
pub async fn post_parse(router: axum::Router, query: &str) -> (StatusCode, ParseResponse) {
    let client = TestClient::new(router);
    let request = serde_json::to_string(&ParseRequest {
        query: query.to_string(),
    })
    .unwrap();

    let res = client
        .post("/parse")
        .body(request)
        .header("Content-Type", "application/json")
        .send()
        .await;

    let status = res.status();
    let body = res.text().await;
    let response = serde_json::from_str(&body)
        .unwrap_or_else(|err| panic!("unexpected response body {body:?}: {err}"));
    (status, response)
}
