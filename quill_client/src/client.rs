use quill::{GenerationRequest, GenerationResult};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{GenerationError, ValidationError},
    form::FormState,
    surface::Surface,
};

pub const GENERATE_PATH: &str = "/generate";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClientState {
    Idle,
    Generating,
}

/// What became of a submit or regenerate action.
#[derive(Debug)]
pub enum Outcome {
    /// Dropped because a generation was already in flight, or there was
    /// nothing to regenerate.
    Ignored,
    Rejected(ValidationError),
    Generated(GenerationResult),
    Failed(GenerationError),
}

/// Turns form submissions into generation requests and renders their
/// outcome. Only one request is ever in flight; actions arriving meanwhile
/// are dropped.
pub struct GenerationClient<S> {
    client: reqwest::Client,
    url: String,
    surface: S,
    in_flight: AtomicBool,
    last_request: Mutex<Option<GenerationRequest>>,
}

/// Marks the client as generating for as long as it's alive.
struct InFlight<'a, S: Surface> {
    owner: &'a GenerationClient<S>,
}

impl<S: Surface> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        self.owner.in_flight.store(false, Ordering::SeqCst);
        self.owner.surface.set_generating(false);
    }
}

impl<S: Surface> GenerationClient<S> {
    pub fn new(base_url: &str, surface: S) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, surface)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, surface: S) -> Self {
        let base_url = base_url.trim_end_matches("/");
        Self {
            client,
            url: format!("{base_url}{GENERATE_PATH}"),
            surface,
            in_flight: AtomicBool::new(false),
            last_request: Mutex::new(None),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> ClientState {
        if self.in_flight.load(Ordering::SeqCst) {
            ClientState::Generating
        } else {
            ClientState::Idle
        }
    }

    pub async fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().await.clone()
    }

    /// Validates the form, remembers the resulting request for later
    /// regeneration, and generates from it.
    pub async fn submit(&self, form: &FormState) -> Outcome {
        if self.state() == ClientState::Generating {
            debug!("generation in flight, ignoring submit");
            return Outcome::Ignored;
        }

        let request = match form.to_request() {
            Ok(request) => request,
            Err(err) => {
                info!("form rejected: {err}");
                self.surface.show_error(&err.to_string());
                return Outcome::Rejected(err);
            }
        };

        let Some(guard) = self.begin() else {
            return Outcome::Ignored;
        };
        *self.last_request.lock().await = Some(request.clone());
        self.run(guard, &request).await
    }

    /// Replays the last submitted request as is.
    pub async fn regenerate(&self) -> Outcome {
        if self.state() == ClientState::Generating {
            debug!("generation in flight, ignoring regenerate");
            return Outcome::Ignored;
        }
        let Some(request) = self.last_request().await else {
            debug!("nothing to regenerate");
            return Outcome::Ignored;
        };
        let Some(guard) = self.begin() else {
            return Outcome::Ignored;
        };
        self.run(guard, &request).await
    }

    fn begin(&self) -> Option<InFlight<'_, S>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlight { owner: self })
    }

    async fn run(&self, guard: InFlight<'_, S>, request: &GenerationRequest) -> Outcome {
        self.surface.hide();
        self.surface.set_generating(true);
        let outcome = match self.generate(request).await {
            Ok(result) => {
                self.surface.show_result(&result);
                Outcome::Generated(result)
            }
            Err(err) => {
                warn!("generation failed: {err}");
                self.surface.show_error(&err.friendly_message());
                Outcome::Failed(err)
            }
        };
        drop(guard);
        outcome
    }

    /// Sends one request to the generation endpoint.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        debug!(
            "requesting a {} {} about {}",
            request.style, request.content_type, request.topic
        );
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                if err.is_builder() {
                    GenerationError::Unexpected(err.to_string())
                } else {
                    GenerationError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable body is treated like an unparseable one.
            let body = response.bytes().await.unwrap_or_default();
            return Err(GenerationError::from_response(status, &body));
        }

        response
            .json::<GenerationResult>()
            .await
            .map_err(|err| GenerationError::Unexpected(err.to_string()))
    }
}
