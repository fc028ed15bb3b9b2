//! JSON command protocol for driving the editor headlessly.

use serde::{Deserialize, Serialize};
use shared::{GeneratedVoxel, GridPos, Tool};

use crate::harness::EditorHarness;
use crate::i18n::tool_label;
use crate::state::{CommitMode, EditOutcome, LoadOutcome, PreviewOutcome, ToolEffect};

/// A command the editor can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Switch the active tool
    SelectTool { tool: Tool },
    /// Set the active color
    SetColor { color: String },
    /// Set the grid size (clamped)
    SetGridSize { size: u32 },
    /// Click on an empty grid cell
    ClickCell { position: GridPos },
    /// Click on an existing voxel
    ClickVoxel {
        index: usize,
        #[serde(default)]
        face_normal: Option<GridPos>,
    },
    /// Report the cell under the pointer
    Hover {
        #[serde(default)]
        cell: Option<GridPos>,
    },
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Clear the entire scene; `confirm` must be true.
    Clear {
        #[serde(default)]
        confirm: bool,
    },
    /// Ask the generation service for a candidate set.
    Generate { prompt: String },
    /// Check whether the outstanding generation has finished.
    PollPreview,
    /// Resolve a prompt with the given voxels, bypassing the service.
    CompletePreview {
        prompt: String,
        voxels: Vec<GeneratedVoxel>,
    },
    /// Recolor the preview; `null` resets it.
    RecolorPreview {
        #[serde(default)]
        color: Option<String>,
    },
    /// Commit the preview into the scene.
    ApplyPreview { mode: CommitMode },
    /// Drop the preview.
    DiscardPreview,
    /// Save the editable state.
    Save,
    /// Load the editable state.
    Load,
    /// Switch between EN and CN.
    ToggleLanguage,
    /// Show or hide voxel outlines.
    ToggleOutlines,
    /// Inspect editor status and voxels.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn outcome_name(outcome: EditOutcome) -> &'static str {
    match outcome {
        EditOutcome::Committed => "committed",
        EditOutcome::Duplicate => "duplicate",
        EditOutcome::OutOfRange => "out_of_range",
        EditOutcome::Declined => "declined",
    }
}

fn effect_json(effect: ToolEffect) -> serde_json::Value {
    match effect {
        ToolEffect::Edited(outcome) => serde_json::json!({ "effect": outcome_name(outcome) }),
        ToolEffect::Picked { color } => serde_json::json!({ "effect": "picked", "color": color }),
        ToolEffect::Ignored => serde_json::json!({ "effect": "ignored" }),
    }
}

fn preview_json(outcome: Option<PreviewOutcome>) -> CommandResponse {
    match outcome {
        Some(PreviewOutcome::Ready { count }) => {
            CommandResponse::ok_with_data(serde_json::json!({ "state": "previewing", "count": count }))
        }
        Some(PreviewOutcome::Failed(e)) => CommandResponse::err(e.to_string()),
        Some(PreviewOutcome::Ignored) => {
            CommandResponse::ok_with_data(serde_json::json!({ "state": "idle" }))
        }
        None => CommandResponse::ok_with_data(serde_json::json!({ "state": "requesting" })),
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut EditorHarness, cmd: EditorCommand) -> CommandResponse {
    match cmd {
        EditorCommand::SelectTool { tool } => {
            harness.select_tool(tool);
            CommandResponse::ok()
        }

        EditorCommand::SetColor { color } => match harness.set_color(&color) {
            Ok(()) => CommandResponse::ok_with_data(
                serde_json::json!({ "color": harness.state.tools.color() }),
            ),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::SetGridSize { size } => {
            let size = harness.set_grid_size(size);
            CommandResponse::ok_with_data(serde_json::json!({ "grid_size": size }))
        }

        EditorCommand::ClickCell { position } => {
            CommandResponse::ok_with_data(effect_json(harness.click_cell(position)))
        }

        EditorCommand::ClickVoxel { index, face_normal } => {
            CommandResponse::ok_with_data(effect_json(harness.click_voxel(index, face_normal)))
        }

        EditorCommand::Hover { cell } => {
            harness.hover(cell);
            CommandResponse::ok()
        }

        EditorCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::Clear { confirm } => {
            let outcome = harness.clear(confirm);
            CommandResponse::ok_with_data(serde_json::json!({ "effect": outcome_name(outcome) }))
        }

        EditorCommand::Generate { prompt } => match harness.generate(&prompt) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "state": "requesting" })),
            Err(e) => CommandResponse::err(e),
        },

        EditorCommand::PollPreview => {
            if !harness.state.preview.is_requesting() {
                return CommandResponse::err("no generation request outstanding");
            }
            preview_json(harness.poll_preview())
        }

        EditorCommand::CompletePreview { prompt, voxels } => {
            match harness.complete_preview(&prompt, Ok(voxels)) {
                Ok(outcome) => preview_json(Some(outcome)),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        EditorCommand::RecolorPreview { color } => {
            match harness.recolor_preview(color.as_deref()) {
                Ok(()) => CommandResponse::ok_with_data(serde_json::json!({
                    "voxels": harness.preview_voxels(),
                })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        EditorCommand::ApplyPreview { mode } => match harness.apply_preview(mode) {
            Some(outcome) => CommandResponse::ok_with_data(serde_json::json!({
                "effect": outcome_name(outcome),
                "voxel_count": harness.voxel_count(),
            })),
            None => CommandResponse::err("no preview to apply"),
        },

        EditorCommand::DiscardPreview => {
            let discarded = harness.discard_preview();
            CommandResponse::ok_with_data(serde_json::json!({ "discarded": discarded }))
        }

        EditorCommand::Save => match harness.save() {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::Load => match harness.load() {
            Ok(LoadOutcome::Absent) => {
                CommandResponse::ok_with_data(serde_json::json!({ "loaded": false }))
            }
            Ok(LoadOutcome::Restored(fields)) => CommandResponse::ok_with_data(serde_json::json!({
                "loaded": true,
                "voxels": fields.voxels,
                "voxel_count": harness.voxel_count(),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::ToggleLanguage => {
            let language = harness.state.display.toggle_language();
            CommandResponse::ok_with_data(serde_json::json!({ "language": language }))
        }

        EditorCommand::ToggleOutlines => {
            let show = harness.state.display.toggle_outlines();
            CommandResponse::ok_with_data(serde_json::json!({ "show_outlines": show }))
        }

        EditorCommand::Inspect => {
            let status = harness.status();
            let language = harness.state.display.language;
            CommandResponse::ok_with_data(serde_json::json!({
                "status": status,
                "tool_label": tool_label(language, status.tool),
                "language": language,
                "show_outlines": harness.state.display.show_outlines,
                "voxels": harness.voxels(),
                "preview": harness.preview_voxels(),
            }))
        }

        EditorCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut EditorHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut EditorHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
