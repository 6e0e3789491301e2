// End-to-end tests: HTTP router -> autocomplete service -> Solr client -> mock Solr.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use autocomplete::api::{app_state::AppState, create_router};
use autocomplete::config::config::SearchConfig;
use autocomplete::search::{SearchClient, SolrSearchClient};
use autocomplete::services::create_autocomplete_service;

fn app_for(server: &MockServer) -> Router {
    let config = SearchConfig {
        url: format!("{}/solr/vitrocore", server.uri()),
        timeout_secs: 2,
        ..SearchConfig::default()
    };
    let client: Arc<dyn SearchClient> = Arc::new(SolrSearchClient::new(&config).unwrap());
    let state = AppState::development(create_autocomplete_service(client, &config));
    create_router(state, true)
}

async fn body_of(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn single_hit_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/vitrocore/select"))
        .and(query_param("q", "nameLowercase:jane\\ doe*"))
        .and(query_param("fq", "type:\"Person\""))
        .and(query_param("rows", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseHeader": {"status": 0, "QTime": 1},
            "response": {
                "numFound": 1,
                "start": 0,
                "docs": [{"URI": "http://x/1", "nameRaw": ["Jane Doe"], "type": ["Person"]}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = body_of(
        app_for(&server),
        "/api/v1/autocomplete?term=Jane%20Doe&type=Person",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"label":"Jane Doe","uri":"http://x/1"}]"#);
}

#[tokio::test]
async fn zero_hits_is_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/vitrocore/select"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 0, "start": 0, "docs": []}
        })))
        .mount(&server)
        .await;

    let (status, body) = body_of(app_for(&server), "/api/v1/autocomplete?term=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn solr_error_is_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/vitrocore/select"))
        .respond_with(ResponseTemplate::new(400).set_body_string("org.apache.solr.search.SyntaxError"))
        .mount(&server)
        .await;

    let (status, body) = body_of(app_for(&server), "/api/v1/autocomplete?term=a%22b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn oversized_term_never_reaches_solr() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uri = format!("/api/v1/autocomplete?term={}", "x".repeat(501));
    let (status, body) = body_of(app_for(&server), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn null_doc_skips_only_that_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/vitrocore/select"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "numFound": 2,
                "start": 0,
                "docs": [{"URI": "http://x/1", "nameRaw": ["Jane"]}, null]
            }
        })))
        .mount(&server)
        .await;

    let (status, body) = body_of(app_for(&server), "/api/v1/autocomplete?term=jan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"label":"Jane","uri":"http://x/1"}]"#);
}

#[tokio::test]
async fn tokenized_request_sends_no_main_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/vitrocore/select"))
        .and(query_param_is_missing("q"))
        .and(query_param("fq", "type:\"Book\""))
        .and(query_param("start", "0"))
        .and(query_param("rows", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "numFound": 1,
                "start": 0,
                "docs": [{"URI": "http://x/7", "nameRaw": ["Tales"]}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = body_of(
        app_for(&server),
        "/api/v1/autocomplete?term=Tales&type=Book&tokenize=true&stem=true",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"label":"Tales","uri":"http://x/7"}]"#);
}

#[tokio::test]
async fn repeated_term_uses_first_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/vitrocore/select"))
        .and(query_param("q", "nameLowercase:jane*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "numFound": 1,
                "start": 0,
                "docs": [{"URI": "http://x/1", "nameRaw": ["Jane"]}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = body_of(app_for(&server), "/api/v1/autocomplete?term=jane&term=doe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"label":"Jane","uri":"http://x/1"}]"#);
}
