// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use prep_console::{ApiClient, config::Config};
use serde_json::{Value, json};

/// A request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

type Responder = Box<dyn Fn(&Recorded) -> (u16, String) + Send + Sync>;

#[derive(Default)]
struct MockApi {
    stubs: Mutex<Vec<(Method, String, Responder)>>,
    log: Mutex<Vec<Recorded>>,
}

/// In-process stand-in for the platform backend.
pub struct TestServer {
    pub address: String,
    api: Arc<MockApi>,
}

impl TestServer {
    /// Spawns the mock backend on a random port.
    pub async fn spawn() -> Self {
        let api = Arc::new(MockApi::default());
        let app = Router::new().fallback(handle).with_state(api.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}/api", port);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { address, api }
    }

    pub fn config(&self) -> Config {
        Config::for_base_url(&self.address).expect("valid base url")
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config())
    }

    /// Answers `method path` with a fixed status and JSON body. Later stubs win.
    pub fn json(&self, method: Method, path: &str, status: u16, body: Value) {
        let body = body.to_string();
        self.respond(method, path, move |_| (status, body.clone()));
    }

    /// Answers `method path` with whatever `f` computes from the request.
    pub fn respond<F>(&self, method: Method, path: &str, f: F)
    where
        F: Fn(&Recorded) -> (u16, String) + Send + Sync + 'static,
    {
        self.api
            .stubs
            .lock()
            .unwrap()
            .push((method, format!("/api{}", path), Box::new(f)));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.api.log.lock().unwrap().clone()
    }

    /// Number of requests received for `method path` (path without the `/api` prefix).
    pub fn count(&self, method: Method, path: &str) -> usize {
        let full = format!("/api{}", path);
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == full)
            .count()
    }

    pub fn last(&self, method: Method, path: &str) -> Option<Recorded> {
        let full = format!("/api{}", path);
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == full)
    }
}

async fn handle(
    State(api): State<Arc<MockApi>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    api.log.lock().unwrap().push(recorded.clone());

    let reply = {
        let stubs = api.stubs.lock().unwrap();
        stubs
            .iter()
            .rev()
            .find(|(m, p, _)| *m == recorded.method && *p == recorded.path)
            .map(|(_, _, f)| f(&recorded))
    };

    let (status, body) = reply.unwrap_or_else(|| {
        (404, json!({ "success": false, "message": "Route not found" }).to_string())
    });
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn alumni_json(id: &str, name: &str, email: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": email,
        "company": "Acme",
        "position": "Engineer",
        "testimonial": "Great prep",
        "rating": 5,
        "featured": false,
        "isActive": true
    })
}

pub fn discussion_json(id: &str, message: &str) -> Value {
    json!({
        "_id": id,
        "message": message,
        "studentId": { "_id": "s1", "name": "Riya", "email": "riya@example.com" },
        "courseId": { "_id": "c1", "title": "DSA Bootcamp" },
        "replies": []
    })
}
