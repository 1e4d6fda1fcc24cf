use crate::utils;
use serde::Deserialize;

#[derive(Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "utils::default_server_binding_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: utils::default_server_binding_addr(),
        }
    }
}

/// Where and how to reach the hosted model that writes the content.
#[derive(Clone, Deserialize)]
pub struct GenerationApiConfig {
    #[serde(default = "utils::default_generation_base_url")]
    pub base_url: String,
    #[serde(default = "utils::default_generation_model")]
    pub model: String,
    /// Supports `${VAR}` references, e.g. `"${GEMINI_API_KEY}"`.
    #[serde(
        default = "utils::default_api_key",
        deserialize_with = "utils::deserialize_with_envsubst"
    )]
    pub api_key: Option<String>,
}

impl Default for GenerationApiConfig {
    fn default() -> Self {
        Self {
            base_url: utils::default_generation_base_url(),
            model: utils::default_generation_model(),
            api_key: utils::default_api_key(),
        }
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationApiConfig,
}
