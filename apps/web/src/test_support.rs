//! In-process stand-in for the search backend, shared by handler and flow tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Json(StatusCode, Value),
    Raw(StatusCode, String),
}

#[derive(Debug)]
struct MockState {
    reply: Reply,
    requests: Vec<SeenRequest>,
}

/// Records every request and answers each with the same canned reply.
#[derive(Debug, Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<MockState>>,
}

impl MockBackend {
    fn replying(reply: Reply) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                reply,
                requests: Vec::new(),
            })),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::replying(Reply::Json(StatusCode::OK, body))
    }

    pub fn status(code: u16) -> Self {
        let status = StatusCode::from_u16(code).expect("valid status code");
        Self::replying(Reply::Json(status, json!({ "detail": "backend failure" })))
    }

    /// 200 with a body that is not JSON.
    pub fn garbage() -> Self {
        Self::replying(Reply::Raw(StatusCode::OK, "<html>oops</html>".to_string()))
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.requests().pop()
    }
}

async fn record_and_reply(
    State(mock): State<MockBackend>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let headers = headers
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let reply = {
        let mut state = mock.inner.lock().unwrap();
        state.requests.push(SeenRequest {
            path,
            headers,
            body,
        });
        state.reply.clone()
    };

    match reply {
        Reply::Json(status, value) => (status, Json(value)).into_response(),
        Reply::Raw(status, text) => (status, text).into_response(),
    }
}

/// Serves `mock` on an ephemeral loopback port and returns its base URL.
pub async fn spawn_backend(mock: MockBackend) -> String {
    let app = Router::new().fallback(record_and_reply).with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A loopback base URL with nothing listening behind it.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn job_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "fields": {
            "job_title": title,
            "job_summary": format!("{title} role"),
            "company": "Acme",
            "job_skills": ["Python, SQL"],
            "job_location": "New York, NY",
            "city": "New York",
            "state": "NY",
            "job_level": "Associate",
            "job_type": "Onsite",
            "job_category": "Data"
        },
        "metadata": { "score": 0.82 }
    })
}
