//! Integration tests for `GET /weather`
//!
//! Both upstreams are wiremock servers; the request log is a SQLite file in a
//! temporary directory.

use std::{collections::HashSet, future::IntoFuture};

use axum::http::StatusCode;
use axum_test::TestServer;
use futures::future::join_all;
use serde_json::{Value, json};
use tempfile::TempDir;
use weather_core::{Config, RequestLog};
use weather_server::{app::build_service, router};
use wiremock::{
    Mock, MockServer, Request, Respond, ResponseTemplate,
    matchers::{method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    server: TestServer,
    translate: MockServer,
    weather: MockServer,
    log: RequestLog,
    _dir: TempDir,
}

async fn spawn_app() -> TestApp {
    let translate = MockServer::start().await;
    let weather = MockServer::start().await;
    let dir = tempfile::tempdir().expect("temp dir");

    let config = Config {
        db_path: dir.path().join("weather.db"),
        weather_api_key: Some("TEST_KEY".to_string()),
        weather_url: format!("{}/data/2.5/weather", weather.uri()),
        translate_url: format!("{}/translate", translate.uri()),
        ..Config::default()
    };

    let service = build_service(&config).expect("service");
    service.request_log().ensure_schema().await.expect("schema");
    let log = service.request_log().clone();
    let server = TestServer::new(router(service)).expect("Failed to create test server");

    TestApp { server, translate, weather, log, _dir: dir }
}

async fn mount_translation(app: &TestApp, body: Value) {
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&app.translate)
        .await;
}

async fn mount_weather(app: &TestApp, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&app.weather)
        .await;
}

/// Answers `{q}` with `{q} (en)`.
struct EchoTranslation;

impl Respond for EchoTranslation {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let q = body["q"].as_str().unwrap_or_default();
        ResponseTemplate::new(200).set_body_json(json!({ "translatedText": format!("{q} (en)") }))
    }
}

/// Reports a condition derived from the `q` parameter.
struct ConditionPerCity;

impl Respond for ConditionPerCity {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let city = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();
        ResponseTemplate::new(200)
            .set_body_json(json!({ "weather": [{ "main": format!("sky over {city}") }] }))
    }
}

// =============================================================================
// Success scenarios
// =============================================================================

#[tokio::test]
async fn returns_original_city_and_logs_translation() {
    let app = spawn_app().await;
    mount_translation(&app, json!({ "translatedText": "Moscow" })).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Moscow"))
        .and(query_param("APPID", "TEST_KEY"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "weather": [{ "id": 600, "main": "Snow" }], "name": "Moscow" })),
        )
        .expect(1)
        .mount(&app.weather)
        .await;

    let response = app.server.get("/weather").add_query_param("city", "Москва").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/json"
    );
    assert!(response.text().contains("Москва"));
    assert_eq!(response.json::<Value>(), json!({ "city": "Москва", "weather": "Snow" }));

    let records = app.log.records(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].city, "Moscow");
    assert_eq!(records[0].weather, "Snow");
}

#[tokio::test]
async fn health_is_ok() {
    let app = spawn_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn repeated_city_uses_first_value() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(EchoTranslation)
        .mount(&app.translate)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "Paris (en)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "weather": [{ "main": "Drizzle" }] })))
        .expect(1)
        .mount(&app.weather)
        .await;

    let response = app.server.get("/weather?city=Paris&city=Lyon").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "city": "Paris", "weather": "Drizzle" }));

    let records = app.log.records(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].city, "Paris (en)");
}

// =============================================================================
// Degraded upstream responses
// =============================================================================

#[tokio::test]
async fn untranslated_city_is_sent_to_weather_as_given() {
    let app = spawn_app().await;
    mount_translation(&app, json!({ "error": "Language not supported" })).await;
    Mock::given(method("GET"))
        .and(query_param("q", "Tlön"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "weather": [{ "main": "Mist" }] })))
        .expect(1)
        .mount(&app.weather)
        .await;

    let response = app.server.get("/weather").add_query_param("city", "Tlön").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "city": "Tlön", "weather": "Mist" }));
    assert_eq!(app.log.records(10).await.unwrap()[0].city, "Tlön");
}

#[tokio::test]
async fn missing_conditions_yield_sentinel() {
    let app = spawn_app().await;
    mount_translation(&app, json!({ "translatedText": "Atlantis" })).await;
    mount_weather(&app, 404, json!({ "cod": "404", "message": "city not found" })).await;

    let response = app.server.get("/weather").add_query_param("city", "Atlántida").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "city": "Atlántida", "weather": "No data available" })
    );

    let records = app.log.records(10).await.unwrap();
    assert_eq!(records[0].city, "Atlantis");
    assert_eq!(records[0].weather, "No data available");
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn missing_city_is_bad_request_without_side_effects() {
    let app = spawn_app().await;

    let response = app.server.get("/weather").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "bad_request");
    assert!(app.translate.received_requests().await.unwrap().is_empty());
    assert!(app.weather.received_requests().await.unwrap().is_empty());
    assert!(app.log.records(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn broken_translation_upstream_is_internal_error() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&app.translate)
        .await;

    let response = app.server.get("/weather").add_query_param("city", "Lisboa").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "internal_error");
    assert_eq!(body["error"]["message"], "internal server error");
    assert!(!body.to_string().contains("Bad Gateway"));
    assert!(app.weather.received_requests().await.unwrap().is_empty());
    assert!(app.log.records(10).await.unwrap().is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_stay_paired() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(EchoTranslation)
        .mount(&app.translate)
        .await;
    Mock::given(method("GET"))
        .respond_with(ConditionPerCity)
        .mount(&app.weather)
        .await;

    let cities: Vec<String> = (0..50).map(|i| format!("city-{i}")).collect();
    let requests = cities
        .iter()
        .map(|city| app.server.get("/weather").add_query_param("city", city).into_future());
    let responses = join_all(requests).await;

    for (city, response) in cities.iter().zip(responses) {
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "city": city, "weather": format!("sky over {city} (en)") })
        );
    }

    let records = app.log.records(100).await.unwrap();
    assert_eq!(records.len(), 50);

    let logged: HashSet<(String, String)> =
        records.into_iter().map(|r| (r.city, r.weather)).collect();
    let expected: HashSet<(String, String)> = cities
        .iter()
        .map(|c| (format!("{c} (en)"), format!("sky over {c} (en)")))
        .collect();
    assert_eq!(logged, expected);
}
