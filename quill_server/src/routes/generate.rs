use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use quill::{ErrorBody, GenerationRequest, GenerationResult};
use tracing::{debug, error, info, warn};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    client::ModelClient,
    models::{prompts::ContentPrompt, state::QuillState},
    utils::{self, ApiError},
};

pub fn router(state: QuillState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(generate))
        .with_state(state)
}

/// Generate a poem or short story.
///
/// Writes a piece about the given topic in the given style, optionally in
/// another language, at a rough length, or imitating an author.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Successfully generated content", body = GenerationResult),
        (status = 422, description = "Request body is invalid", body = ErrorBody),
        (status = 500, description = "Error when generating content", body = ErrorBody)
    )
)]
#[axum::debug_handler(state = QuillState)]
pub async fn generate(
    State(model_client): State<ModelClient>,
    request: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        warn!("rejecting request body: {rejection}");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody::issues([rejection.body_text()])),
        )
    })?;

    info!(
        "generating a {} {} about {}",
        request.style, request.content_type, request.topic
    );
    let prompt = ContentPrompt(&request).to_string();
    debug!("prompt:\n{prompt}");
    let content = model_client.generate(prompt).await.map_err(|err| {
        error!("error generating content: {err}");
        utils::internal_error(format!("Error generating content: {err}"))
    })?;

    let GenerationRequest {
        topic,
        style,
        content_type,
        ..
    } = request;
    Ok(Json(GenerationResult {
        content,
        topic,
        style,
        content_type: content_type.to_string(),
    }))
}
