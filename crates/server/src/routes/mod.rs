use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use shared::{clamp_grid_size, GenerateRequest, GenerateResponse};

use crate::ai::{self, AiError};
use crate::AppState;

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Prompt → candidate voxels
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, StatusCode> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let grid_size = clamp_grid_size(request.grid_size);

    let voxels = ai::generate_voxels(&state, prompt, grid_size)
        .await
        .map_err(|e| {
            tracing::error!("Generation error: {}", e);
            match e {
                AiError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            }
        })?;

    tracing::info!("Generated {} voxels for '{}'", voxels.len(), prompt);
    Ok(Json(GenerateResponse { voxels }))
}
