use crate::client::ModelClient;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct QuillState {
    pub model_client: ModelClient,
}

impl FromRef<QuillState> for ModelClient {
    fn from_ref(state: &QuillState) -> ModelClient {
        state.model_client.clone()
    }
}
