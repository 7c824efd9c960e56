use std::time::Duration;

use scurve_engine::{FailureKind, FetchSettings, JsonFetcher, ReqwestJsonFetcher};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).unwrap()
}

#[tokio::test]
async fn get_returns_parsed_json_and_asks_for_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-cpc-codes"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([["B64C39/02", 5]])))
        .mount(&server)
        .await;

    let fetcher = ReqwestJsonFetcher::new(FetchSettings::default()).unwrap();
    let value = fetcher
        .get_json(&url(&server, "/top-cpc-codes"))
        .await
        .expect("fetch ok");

    assert_eq!(value, json!([["B64C39/02", 5]]));
}

#[tokio::test]
async fn get_fails_on_http_status_with_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = ReqwestJsonFetcher::new(FetchSettings::default()).unwrap();
    let err = fetcher
        .get_json(&url(&server, "/search"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "Service Unavailable");
}

#[tokio::test]
async fn get_fails_on_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = ReqwestJsonFetcher::new(FetchSettings::default()).unwrap();
    let err = fetcher
        .get_json(&url(&server, "/search"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Parse);
}

#[tokio::test]
async fn get_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/predict-s-curve"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestJsonFetcher::new(settings).unwrap();
    let err = fetcher
        .get_json(&url(&server, "/predict-s-curve"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn get_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[1,2,3,4,5,6]", "application/json"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestJsonFetcher::new(settings).unwrap();
    let err = fetcher
        .get_json(&url(&server, "/search"))
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(13)
        }
    );
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"q": "insansız hava aracı", "target": "en"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestJsonFetcher::new(FetchSettings::default()).unwrap();
    let value = fetcher
        .post_json(
            &url(&server, "/translate"),
            &json!({"q": "insansız hava aracı", "target": "en"}),
        )
        .await
        .expect("post ok");

    assert_eq!(value, json!({"ok": true}));
}
