//! Local HTTP stand-in for the OCR and completion services.

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
};
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct CannedResponse {
    status: StatusCode,
    body: String,
}

impl CannedResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct ServerState {
    response: CannedResponse,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct CaptureServer {
    base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl CaptureServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> CapturedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("server received no request")
    }
}

/// Bind a server on an ephemeral port that records every request and answers
/// each one with `response`.
pub async fn spawn_capture_server(response: CannedResponse) -> CaptureServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        response,
        requests: requests.clone(),
    };
    let app = Router::new().fallback(capture).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    CaptureServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

async fn capture(
    State(state): State<ServerState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.requests.lock().unwrap().push(CapturedRequest {
        path: uri.path().to_string(),
        headers,
        body,
    });
    (
        state.response.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.response.body.clone(),
    )
}
