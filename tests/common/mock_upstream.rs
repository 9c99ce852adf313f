//! Stand-ins for the fixtures provider: a real HTTP server for end-to-end
//! tests and a direct `FixtureSource` for service tests.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::{get, web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::Value;

use fixture_sync::errors::SyncError;
use fixture_sync::league::window::SyncWindow;
use fixture_sync::models::fixture::FixtureRecord;
use fixture_sync::services::FixtureSource;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: HashMap<String, String>,
    pub api_key: Option<String>,
    pub api_host: Option<String>,
}

struct UpstreamState {
    status: Mutex<u16>,
    body: Mutex<Value>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockUpstream {
    pub base_url: String,
    state: web::Data<UpstreamState>,
}

impl MockUpstream {
    pub fn respond_with(&self, status: u16, body: Value) {
        *self.state.status.lock().unwrap() = status;
        *self.state.body.lock().unwrap() = body;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

#[get("/fixtures")]
async fn fixtures(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<UpstreamState>,
) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        query: query.into_inner(),
        api_key: header("x-rapidapi-key"),
        api_host: header("x-rapidapi-host"),
    });

    let status = *state.status.lock().unwrap();
    let body = state.body.lock().unwrap().clone();
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap()).json(body)
}

pub async fn spawn_mock_upstream(body: Value) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let state = web::Data::new(UpstreamState {
        status: Mutex::new(200),
        body: Mutex::new(body),
        requests: Mutex::new(Vec::new()),
    });

    let app_state = state.clone();
    let server = HttpServer::new(move || App::new().app_data(app_state.clone()).service(fixtures))
        .workers(1)
        .listen(listener)
        .expect("Failed to listen")
        .run();
    let _ = tokio::spawn(server);

    MockUpstream {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
    }
}

/// Returns a fixed result and records every call.
pub struct StaticFixtureSource {
    result: Mutex<Result<Vec<FixtureRecord>, String>>,
    calls: Mutex<Vec<(String, SyncWindow, String)>>,
}

impl StaticFixtureSource {
    pub fn returning(records: Vec<FixtureRecord>) -> Self {
        Self {
            result: Mutex::new(Ok(records)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Mutex::new(Err(reason.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, SyncWindow, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FixtureSource for StaticFixtureSource {
    async fn fetch_week(
        &self,
        competition_id: &str,
        window: &SyncWindow,
        timezone: &str,
    ) -> Result<Vec<FixtureRecord>, SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push((competition_id.to_string(), *window, timezone.to_string()));
        self.result
            .lock()
            .unwrap()
            .clone()
            .map_err(SyncError::UpstreamUnavailable)
    }
}
