use crate::models::{
    client::{GenerateContentRequest, GenerateContentResponse, ModelClientError},
    config::GenerationApiConfig,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the hosted model that writes the content.
#[derive(Clone)]
pub struct ModelClient {
    config: GenerationApiConfig,
    client: reqwest::Client,
}

impl ModelClient {
    pub fn new(config: GenerationApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { config, client })
    }

    pub async fn generate(&self, prompt: String) -> Result<String, ModelClientError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ModelClientError::MissingApiKey)?;
        let base_url = self.config.base_url.trim_end_matches("/");
        let url = format!("{base_url}/models/{}:generateContent", self.config.model);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from(prompt))
            .send()
            .await
            .map_err(|err| ModelClientError::ApiConnection(format!("{err:?}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelClientError::ApiStatus(format!("{status} {body}")));
        }

        let text = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| ModelClientError::ResponseJson(err.to_string()))?
            .text();
        if text.is_empty() {
            return Err(ModelClientError::EmptyResponse);
        }
        Ok(text)
    }
}
