//! Fake Apollo endpoint for tests: an axum router on an ephemeral local port.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::apollo_client::ApolloClient;
use crate::config::Config;
use crate::search::classifier::InternationalGraduateFilter;
use crate::state::AppState;

/// Canned response served by [`spawn_fake_apollo`].
#[derive(Clone)]
pub struct FakeApollo {
    status: u16,
    body: Value,
    delay: Option<Duration>,
}

impl FakeApollo {
    pub fn respond(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    canned: FakeApollo,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct FakeApolloHandle {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeApolloHandle {
    pub async fn last_request(&self) -> Option<SeenRequest> {
        self.seen.lock().await.last().cloned()
    }

    pub async fn request_count(&self) -> usize {
        self.seen.lock().await.len()
    }
}

async fn people_search(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.seen.lock().await.push(SeenRequest {
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    if let Some(delay) = state.canned.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(state.canned.status).unwrap();
    (status, Json(state.canned.body.clone()))
}

pub async fn spawn_fake_apollo(canned: FakeApollo) -> FakeApolloHandle {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/people/search", post(people_search))
        .with_state(FakeState {
            canned,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeApolloHandle {
        base_url: format!("http://{addr}/v1"),
        seen,
    }
}

pub fn test_config(api_key: Option<&str>, base_url: &str) -> Config {
    Config {
        apollo_api_key: api_key.map(str::to_string),
        apollo_base_url: base_url.to_string(),
        output_dir: std::env::temp_dir().join("scout-test-results"),
        default_location: "United States".to_string(),
        default_seniority: vec!["entry".to_string(), "junior".to_string()],
        default_limit: 25,
        port: "0".to_string(),
        rust_log: "info".to_string(),
    }
}

/// State wired to a fake Apollo at `base_url`, or unconfigured when `api_key` is None.
pub fn test_state(api_key: Option<&str>, base_url: &str) -> AppState {
    let apollo = api_key.map(|k| ApolloClient::new(k.to_string(), base_url).unwrap());
    AppState {
        apollo,
        filter: Arc::new(InternationalGraduateFilter),
    }
}
