//! Local stand-in for the AIC API
//!
//! Serves canned responses for `artworks/{id}`, `images/{id}` and `search`
//! on an ephemeral port and records each request it receives.

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned response
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: String,
}

impl StubResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// A request the stub received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub aic_user_agent: Option<String>,
}

#[derive(Default)]
struct StubState {
    artworks: Mutex<HashMap<String, StubResponse>>,
    images: Mutex<HashMap<String, StubResponse>>,
    search: Mutex<Option<StubResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubState {
    fn record(&self, path: String, query: Option<String>, headers: &HeaderMap) {
        let aic_user_agent = headers
            .get("AIC-User-Agent")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(RecordedRequest {
            path,
            query,
            aic_user_agent,
        });
    }
}

fn respond(found: Option<StubResponse>) -> Response {
    match found {
        Some(stub) => (
            stub.status,
            [("content-type", "application/json")],
            stub.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            r#"{"status":404,"error":"Not found","detail":"No such record"}"#,
        )
            .into_response(),
    }
}

async fn artwork(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    state.record(format!("/api/v1/artworks/{}", id), query, &headers);
    let found = state.artworks.lock().unwrap().get(&id).cloned();
    respond(found)
}

async fn image(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    state.record(format!("/api/v1/images/{}", id), query, &headers);
    let found = state.images.lock().unwrap().get(&id).cloned();
    respond(found)
}

async fn search(
    State(state): State<Arc<StubState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    state.record("/api/v1/search".to_string(), query, &headers);
    let found = state.search.lock().unwrap().clone();
    respond(found)
}

/// Running stub server
pub struct StubAic {
    state: Arc<StubState>,
    /// `http://127.0.0.1:{port}/api/v1/`
    pub api_base_url: String,
}

impl StubAic {
    /// Bind an ephemeral port and start serving
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/api/v1/artworks/:id", get(artwork))
            .route("/api/v1/images/:id", get(image))
            .route("/api/v1/search", get(search))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            api_base_url: format!("http://{}/api/v1/", addr),
        }
    }

    pub fn set_artwork(&self, id: u64, response: StubResponse) {
        self.state
            .artworks
            .lock()
            .unwrap()
            .insert(id.to_string(), response);
    }

    pub fn set_image(&self, image_id: &str, response: StubResponse) {
        self.state
            .images
            .lock()
            .unwrap()
            .insert(image_id.to_string(), response);
    }

    pub fn set_search(&self, response: StubResponse) {
        *self.state.search.lock().unwrap() = Some(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}
