//! Headless editor harness for programmatic scene manipulation.
//!
//! Bundles the editor state with a blob store and, optionally, a generation
//! service. Non-fatal failures become notifications instead of errors.

use std::sync::Arc;

use serde::Serialize;
use shared::{GridPos, InteractionEvent, Tool, Voxel};

use crate::color::ColorError;
use crate::generation::{GenerationResult, VoxelGenerator};
use crate::i18n::t;
use crate::state::{
    BlobStore, CommitMode, EditOutcome, EditorState, LoadOutcome, MemoryStore, PersistenceError,
    PreviewError, PreviewOutcome, ToolEffect,
};

/// Viewport overlay data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInfo {
    pub voxel_count: usize,
    pub tool: Tool,
    pub color: String,
    pub grid_size: u32,
    pub hovered: Option<GridPos>,
    pub preview_mode: bool,
    pub generating: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Headless editor: state, storage and generation wiring
pub struct EditorHarness {
    pub state: EditorState,
    store: Box<dyn BlobStore>,
    generator: Option<Arc<dyn VoxelGenerator>>,
    runtime: Option<tokio::runtime::Handle>,
    notifications: Vec<String>,
}

impl EditorHarness {
    /// Create a new empty harness backed by an in-memory store.
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    pub fn with_store(store: Box<dyn BlobStore>) -> Self {
        Self {
            state: EditorState::default(),
            store,
            generator: None,
            runtime: None,
            notifications: Vec::new(),
        }
    }

    /// Attach a generation service; requests run on `runtime`
    pub fn with_generator(
        mut self,
        generator: Arc<dyn VoxelGenerator>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        self.generator = Some(generator);
        self.runtime = Some(runtime);
        self
    }

    fn notify(&mut self, key: &str) {
        let msg = t(self.state.display.language, key);
        self.notifications.push(msg.to_string());
    }

    /// Notifications raised since the last call
    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    // ── Tools ─────────────────────────────────────────────────

    pub fn select_tool(&mut self, tool: Tool) {
        self.state.tools.tool = tool;
    }

    pub fn set_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.state.tools.set_color(hex)
    }

    pub fn set_grid_size(&mut self, size: u32) -> u32 {
        self.state.tools.set_grid_size(size)
    }

    pub fn click_cell(&mut self, position: GridPos) -> ToolEffect {
        self.state.click(InteractionEvent::CellClick { position })
    }

    pub fn click_voxel(&mut self, index: usize, face_normal: Option<GridPos>) -> ToolEffect {
        self.state.click(InteractionEvent::VoxelClick { index, face_normal })
    }

    pub fn hover(&mut self, cell: Option<GridPos>) {
        self.state.set_hovered(cell);
    }

    // ── History ───────────────────────────────────────────────

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        self.state.scene.undo()
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        self.state.scene.redo()
    }

    /// Clear the scene if `confirmed`
    pub fn clear(&mut self, confirmed: bool) -> EditOutcome {
        self.state.scene.clear(|_| confirmed)
    }

    // ── AI preview ────────────────────────────────────────────

    /// Submit a prompt to the attached generation service
    pub fn generate(&mut self, prompt: &str) -> Result<(), String> {
        let (Some(generator), Some(runtime)) = (self.generator.clone(), self.runtime.clone())
        else {
            return Err("no generation service configured".to_string());
        };
        let grid_size = self.state.tools.grid_size();
        self.state
            .preview
            .request(prompt, grid_size, generator, &runtime)
            .map_err(|e| e.to_string())
    }

    /// Pick up a finished generation, if any
    pub fn poll_preview(&mut self) -> Option<PreviewOutcome> {
        let outcome = self.state.preview.poll()?;
        self.observe(&outcome);
        Some(outcome)
    }

    /// Wait for the outstanding generation to finish
    pub async fn wait_preview(&mut self) -> Option<PreviewOutcome> {
        let outcome = self.state.preview.wait().await?;
        self.observe(&outcome);
        Some(outcome)
    }

    /// Start a request and resolve it with `result` straight away
    pub fn complete_preview(
        &mut self,
        prompt: &str,
        result: GenerationResult,
    ) -> Result<PreviewOutcome, PreviewError> {
        self.state.preview.begin_request(prompt)?;
        let outcome = self.state.preview.complete(result);
        self.observe(&outcome);
        Ok(outcome)
    }

    fn observe(&mut self, outcome: &PreviewOutcome) {
        if let PreviewOutcome::Failed(_) = outcome {
            self.notify("msg.ai_failed");
        }
    }

    pub fn recolor_preview(&mut self, hex: Option<&str>) -> Result<(), PreviewError> {
        self.state.preview.recolor(hex)
    }

    pub fn apply_preview(&mut self, mode: CommitMode) -> Option<EditOutcome> {
        self.state.apply_preview(mode)
    }

    pub fn discard_preview(&mut self) -> bool {
        self.state.discard_preview()
    }

    pub fn preview_voxels(&self) -> &[Voxel] {
        self.state.preview.preview_voxels()
    }

    // ── Persistence ───────────────────────────────────────────

    pub fn save(&mut self) -> Result<(), PersistenceError> {
        let result = self.state.save(self.store.as_mut());
        match &result {
            Ok(()) => self.notify("msg.saved"),
            Err(e) => {
                tracing::error!("Failed to save state: {e}");
                self.notify("msg.save_failed");
            }
        }
        result
    }

    pub fn load(&mut self) -> Result<LoadOutcome, PersistenceError> {
        let result = self.state.load(self.store.as_ref());
        if result.is_err() {
            self.notify("msg.load_failed");
        }
        result
    }

    /// Export the current scene voxels as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(self.state.scene.voxels()).unwrap_or_default()
    }

    /// Replace the scene with voxels from JSON (undoable)
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let voxels: Vec<Voxel> =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.state.scene.replace_all(voxels);
        Ok(())
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn voxel_count(&self) -> usize {
        self.state.scene.len()
    }

    pub fn voxels(&self) -> &[Voxel] {
        self.state.scene.voxels()
    }

    pub fn status(&self) -> StatusInfo {
        StatusInfo {
            voxel_count: self.state.scene.len(),
            tool: self.state.tools.tool,
            color: self.state.tools.color().to_string(),
            grid_size: self.state.tools.grid_size(),
            hovered: self.state.hovered,
            preview_mode: self.state.preview.is_previewing(),
            generating: self.state.preview.is_requesting(),
            can_undo: self.state.scene.can_undo(),
            can_redo: self.state.scene.can_redo(),
        }
    }
}

impl Default for EditorHarness {
    fn default() -> Self {
        Self::new()
    }
}
