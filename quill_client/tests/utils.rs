#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use quill::GenerationResult;
use quill_client::Surface;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::{net::TcpListener, sync::Notify};

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    Generating(bool),
    Hide,
    Result(GenerationResult),
    Error(String),
}

/// Surface that remembers everything it was asked to render.
#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().expect("events lock").clone()
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl Surface for RecordingSurface {
    fn set_generating(&self, generating: bool) {
        self.push(SurfaceEvent::Generating(generating));
    }

    fn hide(&self) {
        self.push(SurfaceEvent::Hide);
    }

    fn show_result(&self, result: &GenerationResult) {
        self.push(SurfaceEvent::Result(result.clone()));
    }

    fn show_error(&self, message: &str) {
        self.push(SurfaceEvent::Error(message.to_string()));
    }
}

/// A request as seen by the mock endpoint.
#[derive(Clone, Debug)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Received {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

/// Stand-in for the generation endpoint that answers every request with
/// the same canned response.
#[derive(Clone)]
pub struct MockEndpoint {
    status: StatusCode,
    body: String,
    gate: Option<Arc<Notify>>,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockEndpoint {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            gate: None,
            received: Arc::default(),
        }
    }

    pub fn ok(result: &GenerationResult) -> Self {
        Self::new(
            StatusCode::OK,
            serde_json::to_string(result).expect("serializable"),
        )
    }

    /// Holds every response until the returned handle is notified.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().expect("received lock").clone()
    }

    /// Serves the endpoint on an ephemeral port and returns its base URL.
    pub async fn spawn(&self) -> Result<String, Box<dyn std::error::Error>> {
        let router = Router::new()
            .route("/generate", post(generate))
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move { axum::serve(listener, router).await });
        Ok(format!("http://{addr}"))
    }
}

async fn generate(State(mock): State<MockEndpoint>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    mock.received.lock().expect("received lock").push(Received {
        content_type,
        body: body.to_vec(),
    });
    if let Some(gate) = &mock.gate {
        gate.notified().await;
    }
    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.body.clone(),
    )
        .into_response()
}

pub fn robots_result() -> GenerationResult {
    GenerationResult {
        content: "Gears that giggle,\nbolts that wiggle...".to_string(),
        content_type: "poem".to_string(),
        style: "funny".to_string(),
        topic: "robots".to_string(),
    }
}

pub fn robots_request_json() -> Value {
    json!({
        "topic": "robots",
        "style": "funny",
        "content_type": "poem",
        "language": "english",
        "length": null,
        "author": null
    })
}

/// An address nothing is listening on.
pub async fn dead_url() -> Result<String, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
