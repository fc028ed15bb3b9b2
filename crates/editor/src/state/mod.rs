pub mod persistence;
pub mod preview;
pub mod scene;
pub mod settings;
pub mod tools;

use shared::{GridPos, InteractionEvent, Voxel};

pub use persistence::{
    BlobStore, EditableSnapshot, FileStore, LoadOutcome, MemoryStore, PersistenceError,
    STORAGE_KEY,
};
pub use preview::{CommitMode, PreviewCandidate, PreviewError, PreviewOutcome, PreviewWorkflow};
pub use scene::{EditOutcome, History, SceneState, CLEAR_CONFIRMATION, HISTORY_CAPACITY};
pub use settings::DisplaySettings;
pub use tools::{dispatch, ToolEffect, ToolState};

/// Combined editor state.
///
/// Each component only sees its own slice: the dispatcher gets tools and
/// scene, the preview workflow touches the scene only on commit.
#[derive(Default)]
pub struct EditorState {
    pub scene: SceneState,
    pub tools: ToolState,
    pub preview: PreviewWorkflow,
    pub display: DisplaySettings,
    /// Cell under the pointer, as reported by the viewport
    pub hovered: Option<GridPos>,
}

impl EditorState {
    /// Route a viewport click through the active tool
    pub fn click(&mut self, event: InteractionEvent) -> ToolEffect {
        dispatch(&mut self.tools, &mut self.scene, event)
    }

    pub fn set_hovered(&mut self, cell: Option<GridPos>) {
        self.hovered = cell;
    }

    /// Merge the candidate set into the scene and return to idle.
    ///
    /// `None` when no preview is active.
    pub fn apply_preview(&mut self, mode: CommitMode) -> Option<EditOutcome> {
        let voxels = self.preview.take_working()?;
        tracing::info!("Committing {} preview voxels ({:?})", voxels.len(), mode);
        Some(match mode {
            CommitMode::Replace => self.scene.replace_all(voxels),
            CommitMode::Append => self.scene.append_all(voxels),
        })
    }

    pub fn discard_preview(&mut self) -> bool {
        self.preview.discard()
    }

    /// Scene voxels followed by the preview, in render order
    pub fn render_voxels(&self) -> impl Iterator<Item = (&Voxel, bool)> {
        self.scene
            .voxels()
            .iter()
            .map(|v| (v, false))
            .chain(self.preview.preview_voxels().iter().map(|v| (v, true)))
    }
}
