#![allow(dead_code)]

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::post,
};
use quill_server::models::config::{GenerationApiConfig, QuillConfig, ServerConfig};
use reqwest::Response;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub async fn assert_ok_response(response: Response) -> Result<Response, String> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let body = response.text().await.map_err(|err| format!("{err:?}"))?;
        Err(body)
    }
}

/// A `generateContent` call as seen by the fake model API.
#[derive(Clone, Debug)]
pub struct UpstreamCall {
    pub api_key: Option<String>,
    pub body: Value,
}

impl UpstreamCall {
    pub fn prompt(&self) -> &str {
        self.body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
    }
}

/// Fake hosted model API that answers every call the same way.
#[derive(Clone)]
pub struct Upstream {
    status: StatusCode,
    body: Value,
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
}

impl Upstream {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            calls: Arc::default(),
        }
    }

    pub fn writing(text: &str) -> Self {
        Self::new(
            StatusCode::OK,
            json!({
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": text}]}}
                ]
            }),
        )
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Serves the fake API and returns its base URL.
    pub async fn spawn(&self) -> Result<String, Box<dyn std::error::Error>> {
        let router = Router::new()
            .route("/v1beta/models/{call}", post(generate_content))
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move { axum::serve(listener, router).await });
        Ok(format!("http://{addr}/v1beta"))
    }
}

async fn generate_content(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    upstream
        .calls
        .lock()
        .expect("calls lock")
        .push(UpstreamCall { api_key, body });
    (upstream.status, Json(upstream.body.clone()))
}

pub fn config(base_url: &str, api_key: Option<&str>) -> QuillConfig {
    QuillConfig {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
        },
        generation: GenerationApiConfig {
            base_url: base_url.to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: api_key.map(str::to_string),
        },
    }
}

/// Serves the full application and returns its base URL.
pub async fn spawn_server(config: QuillConfig) -> Result<String, Box<dyn std::error::Error>> {
    quill_server::init_tracing();
    let (binding_addr, state) = quill_server::init(config)?;
    let router = quill_server::router(state);
    let listener = TcpListener::bind(binding_addr).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(format!("http://{addr}"))
}
