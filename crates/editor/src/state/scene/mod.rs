//! Scene state management
//!
//! The scene is an ordered sequence of voxels with unique positions, plus the
//! bounded undo/redo history of its snapshots.

mod history;
mod voxel_ops;

pub use history::{History, HISTORY_CAPACITY};
pub use voxel_ops::CLEAR_CONFIRMATION;

use shared::{GridPos, Voxel};

/// Result of a Scene Store mutation.
///
/// Rejections are silent no-ops: nothing is recorded and nothing is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The scene changed and one history entry was recorded
    Committed,
    /// `add` targeted an occupied position
    Duplicate,
    /// The voxel index does not exist
    OutOfRange,
    /// A destructive action was not confirmed
    Declined,
}

impl EditOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, EditOutcome::Committed)
    }
}

/// Scene voxels and undo/redo history
pub struct SceneState {
    voxels: Vec<Voxel>,
    history: History,
    /// Monotonically increasing version counter for cache invalidation
    version: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::from_voxels(Vec::new())
    }
}

impl SceneState {
    /// Scene with the given voxels as its only history entry
    pub fn from_voxels(voxels: Vec<Voxel>) -> Self {
        Self {
            history: History::new(&voxels),
            voxels,
            version: 0,
        }
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn get(&self, index: usize) -> Option<&Voxel> {
        self.voxels.get(index)
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Index of the voxel occupying `position`
    pub fn index_of(&self, position: GridPos) -> Option<usize> {
        self.voxels.iter().position(|v| v.position == position)
    }

    pub fn is_occupied(&self, position: GridPos) -> bool {
        self.index_of(position).is_some()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current scene version (increments on every change)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the scene and restart history from it (fresh load)
    pub fn load(&mut self, voxels: Vec<Voxel>) {
        self.history.reset(&voxels);
        self.voxels = voxels;
        self.version += 1;
    }

    /// Record the current voxels as a new history entry
    fn commit(&mut self) -> EditOutcome {
        self.history.record(&self.voxels);
        self.version += 1;
        EditOutcome::Committed
    }
}
