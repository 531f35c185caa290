use axum::{extract::State, http::StatusCode};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// No `Debug` derive: the body carries a secret.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    pub api_key: String,
}

/// PUT /api/settings/api-key
///
/// Stores an interactively supplied completion-service key for this process.
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ApiKeyRequest>,
) -> Result<StatusCode, AppError> {
    let key = request.api_key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("apiKey cannot be empty".to_string()));
    }

    state.credentials.set(SecretString::from(key.to_string()));
    info!("Completion API key updated");

    Ok(StatusCode::NO_CONTENT)
}
