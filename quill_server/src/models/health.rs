use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
