use serde_json::{json, Value};
use shared::{GeneratedVoxel, MAX_GENERATED_VOXELS};

use crate::AppState;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("upstream response had no text")]
    EmptyResponse,
    #[error("model output is not a voxel list: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub fn build_prompt(prompt: &str, grid_size: u32) -> String {
    let max = grid_size.saturating_sub(1);
    format!(
        "Generate a list of voxel coordinates and colors based on this prompt: \"{prompt}\".\n\
         Return the data as a JSON array of objects with {{x, y, z, color}}.\n\
         The workspace is a {grid_size}x{grid_size}x{grid_size} grid. \
         Ensure coordinates x, y, z are integers within the range [0, {max}].\n\
         Limit the output to {MAX_GENERATED_VOXELS} voxels."
    )
}

/// Structured-output schema: an array of `{x, y, z, color}`
fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "x": { "type": "INTEGER" },
                "y": { "type": "INTEGER" },
                "z": { "type": "INTEGER" },
                "color": { "type": "STRING" }
            },
            "required": ["x", "y", "z", "color"]
        }
    })
}

pub async fn generate_voxels(
    state: &AppState,
    prompt: &str,
    grid_size: u32,
) -> Result<Vec<GeneratedVoxel>, AiError> {
    let api_key = state.api_key.as_ref().ok_or(AiError::MissingApiKey)?;

    let url = format!("{GEMINI_BASE}/{}:generateContent", state.model);
    let response = state
        .client
        .post(url)
        .header("x-goog-api-key", api_key)
        .json(&json!({
            "contents": [{ "parts": [{ "text": build_prompt(prompt, grid_size) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AiError::Status(response.status().as_u16()));
    }

    let body: Value = response.json().await?;
    let text = extract_text(&body).ok_or(AiError::EmptyResponse)?;
    parse_voxels(text, grid_size)
}

/// First candidate's text part
fn extract_text(body: &Value) -> Option<&str> {
    body["candidates"][0]["content"]["parts"][0]["text"].as_str()
}

/// Parse the model's JSON array. Entries outside the grid are dropped and
/// the list is capped at [`MAX_GENERATED_VOXELS`].
pub fn parse_voxels(text: &str, grid_size: u32) -> Result<Vec<GeneratedVoxel>, AiError> {
    let raw: Vec<GeneratedVoxel> = serde_json::from_str(text)?;
    let limit = grid_size as i32;
    let total = raw.len();

    let voxels: Vec<GeneratedVoxel> = raw
        .into_iter()
        .filter(|v| [v.x, v.y, v.z].iter().all(|c| (0..limit).contains(c)))
        .take(MAX_GENERATED_VOXELS)
        .collect();

    if voxels.len() < total {
        tracing::debug!("Kept {} of {} generated voxels", voxels.len(), total);
    }
    Ok(voxels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_bounds_and_limit() {
        let prompt = build_prompt("a red mushroom", 16);
        assert!(prompt.contains("\"a red mushroom\""));
        assert!(prompt.contains("16x16x16"));
        assert!(prompt.contains("[0, 15]"));
        assert!(prompt.contains("50 voxels"));
    }

    #[test]
    fn test_extract_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
        });
        assert_eq!(extract_text(&body), Some("[]"));
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
    }

    #[test]
    fn test_parse_drops_out_of_range() {
        let text = r##"[
            {"x": 0, "y": 0, "z": 0, "color": "#ff0000"},
            {"x": 16, "y": 0, "z": 0, "color": "#00ff00"},
            {"x": 3, "y": -1, "z": 2, "color": "#0000ff"},
            {"x": 15, "y": 15, "z": 15, "color": "#ffffff"}
        ]"##;
        let voxels = parse_voxels(text, 16).unwrap();
        assert_eq!(voxels.len(), 2);
        assert_eq!(voxels[1].position(), [15, 15, 15]);
    }

    #[test]
    fn test_parse_caps_count() {
        let entries: Vec<Value> = (0..80)
            .map(|i| json!({ "x": i % 8, "y": i / 8, "z": 0, "color": "#33ff00" }))
            .collect();
        let voxels = parse_voxels(&Value::Array(entries).to_string(), 16).unwrap();
        assert_eq!(voxels.len(), MAX_GENERATED_VOXELS);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_voxels("{\"voxels\": []}", 16),
            Err(AiError::InvalidJson(_))
        ));
    }
}
