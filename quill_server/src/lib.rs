use axum::Router;
use std::fs::File;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub mod client;
pub mod models;
pub mod routes;
mod utils;

#[derive(OpenApi)]
#[openapi(info(
    title = "Creative Story Generator",
    description = "Endpoints for writing poems and short stories with a hosted language model"
))]
struct ApiDoc;

type BindingAddress = String;

/// Logs are configured through `RUST_LOG`. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}

/// Configuration comes from an optional JSON file at `QUILL_CONFIG_PATH`,
/// falling back to environment variables and defaults.
pub fn load_config() -> Result<models::config::QuillConfig, Box<dyn std::error::Error>> {
    match dotenvy::var("QUILL_CONFIG_PATH") {
        Ok(config_path) => {
            info!("loading config from {config_path}");
            let config_file = File::open(config_path)?;
            Ok(serde_json::from_reader(config_file)?)
        }
        Err(_) => Ok(models::config::QuillConfig::default()),
    }
}

pub fn init(
    config: models::config::QuillConfig,
) -> Result<(BindingAddress, models::state::QuillState), Box<dyn std::error::Error>> {
    let models::config::QuillConfig { server, generation } = config;
    if generation.api_key.is_none() {
        tracing::warn!("no API key configured, generation requests will fail");
    }
    let model_client = client::ModelClient::new(generation)?;
    let state = models::state::QuillState { model_client };
    Ok((server.bind_addr, state))
}

/// All routes plus the OpenAPI docs at `/swagger-ui`.
pub fn router(state: models::state::QuillState) -> Router {
    let openapi_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes::generate::router(state))
        .merge(routes::health::router());
    let (router, api) = openapi_router.split_for_parts();
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
}
