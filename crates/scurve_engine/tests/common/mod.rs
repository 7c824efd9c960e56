#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use scurve_engine::{EngineConfig, FailureKind, FetchError, JsonFetcher, SearchOrchestrator};
use serde_json::{json, Value};
use tokio::sync::Semaphore;
use url::Url;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scurve_logging::initialize_for_tests);
}

pub fn curve_body(saturation_year: i32) -> Value {
    json!({
        "historical_data": [[2016, 1], [2017, 3], [2018, 6]],
        "future_predictions": [[2019, 8.5], [2020, 9.4]],
        "logistic_parameters": {"K": 10.0, "t_m": 2017.2, "r": 0.9},
        "99_saturation_level": 9.9,
        "estimated_saturation_year": saturation_year
    })
}

pub async fn mount_search(server: &MockServer, query: &str, hits: Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("search_query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "filtered_hits": hits })))
        .mount(server)
        .await;
}

pub async fn mount_top_codes(server: &MockServer, query: &str, codes: Value) {
    Mock::given(method("GET"))
        .and(path("/top-cpc-codes"))
        .and(query_param("search_query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(codes))
        .mount(server)
        .await;
}

/// `code_prefix` is matched against the start of the encoded path segment.
pub async fn mount_title(server: &MockServer, code_prefix: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^/cpc-title/{code_prefix}")))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_curve(server: &MockServer, code: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/predict-s-curve"))
        .and(query_param("cpc_code", code))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn title(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "title": text }))
}

pub fn curve(saturation_year: i32) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(curve_body(saturation_year))
}

/// Mounts the full drone scenario: two hits, two codes, titles and curves for both.
pub async fn mount_drone_backend(server: &MockServer) {
    mount_search(server, "drone", json!([{"_id": "p1"}, {"_id": "p2"}])).await;
    mount_top_codes(server, "drone", json!([["B64C39/02", 5], ["G06K9/00", 3]])).await;
    mount_title(server, "B64C39", title("AIRCRAFT")).await;
    mount_title(server, "G06K9", title("RECOGNITION")).await;
    mount_curve(server, "B64C39/02", curve(2030)).await;
    mount_curve(server, "G06K9/00", curve(2034)).await;
}

pub fn orchestrator_for(server: &MockServer) -> SearchOrchestrator {
    SearchOrchestrator::from_config(&EngineConfig::with_base_url(server.uri()))
        .expect("orchestrator")
}

/// In-memory transport: answers by URL path, optionally holding back requests
/// whose query string contains `gated` until the gate is opened.
pub struct ScriptedFetcher {
    routes: Vec<(String, Result<Value, FetchError>)>,
    gated: Option<String>,
    gate: Semaphore,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            gated: None,
            gate: Semaphore::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Routes match when the URL path plus query contains `pattern`; first match wins.
    pub fn route(mut self, pattern: &str, response: Value) -> Self {
        self.routes.push((pattern.to_string(), Ok(response)));
        self
    }

    pub fn fail(mut self, pattern: &str, status: u16) -> Self {
        self.routes.push((
            pattern.to_string(),
            Err(FetchError {
                kind: FailureKind::HttpStatus(status),
                message: "scripted failure".to_string(),
            }),
        ));
        self
    }

    pub fn gate_on(mut self, pattern: &str) -> Self {
        self.gated = Some(pattern.to_string());
        self
    }

    pub fn open_gate(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, url: &Url) -> Result<Value, FetchError> {
        let target = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };
        self.routes
            .iter()
            .find(|(pattern, _)| target.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| {
                Err(FetchError {
                    kind: FailureKind::HttpStatus(404),
                    message: format!("no route for {target}"),
                })
            })
    }
}

#[async_trait::async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn get_json(&self, url: &Url) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(gated) = &self.gated {
            if url.query().is_some_and(|query| query.contains(gated.as_str())) {
                let _permit = self.gate.acquire().await.unwrap();
            }
        }
        self.respond(url)
    }

    async fn post_json(&self, url: &Url, _body: &Value) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.respond(url)
    }
}

pub fn scripted(fetcher: ScriptedFetcher) -> (Arc<ScriptedFetcher>, SearchOrchestrator) {
    let fetcher = Arc::new(fetcher);
    let orchestrator = SearchOrchestrator::with_fetcher(
        &EngineConfig::with_base_url("http://backend.test"),
        fetcher.clone(),
    )
    .expect("orchestrator");
    (fetcher, orchestrator)
}
