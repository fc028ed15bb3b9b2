//! Voxel add/remove/recolor operations

use shared::{GridPos, Voxel};

use super::{EditOutcome, SceneState};

/// Prompt shown before wiping the scene
pub const CLEAR_CONFIRMATION: &str = "Are you sure? This will wipe the tape.";

impl SceneState {
    /// Place a voxel at an empty position
    pub fn add(&mut self, position: GridPos, color: impl Into<String>) -> EditOutcome {
        if self.is_occupied(position) {
            tracing::debug!("add rejected: {:?} is occupied", position);
            return EditOutcome::Duplicate;
        }
        self.voxels.push(Voxel::new(position, color));
        self.commit()
    }

    /// Delete the voxel at `index`, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> EditOutcome {
        if index >= self.voxels.len() {
            tracing::debug!("remove rejected: index {} out of range", index);
            return EditOutcome::OutOfRange;
        }
        self.voxels.remove(index);
        self.commit()
    }

    /// Overwrite the color of the voxel at `index`
    pub fn recolor(&mut self, index: usize, color: impl Into<String>) -> EditOutcome {
        match self.voxels.get_mut(index) {
            Some(voxel) => {
                voxel.color = color.into();
                self.commit()
            }
            None => {
                tracing::debug!("recolor rejected: index {} out of range", index);
                EditOutcome::OutOfRange
            }
        }
    }

    /// Replace every voxel
    pub fn replace_all(&mut self, voxels: Vec<Voxel>) -> EditOutcome {
        self.voxels = voxels;
        self.commit()
    }

    /// Concatenate voxels onto the scene without checking positions
    pub fn append_all(&mut self, voxels: Vec<Voxel>) -> EditOutcome {
        self.voxels.extend(voxels);
        self.commit()
    }

    /// Wipe the scene once `confirm` agrees to [`CLEAR_CONFIRMATION`]
    pub fn clear(&mut self, confirm: impl FnOnce(&str) -> bool) -> EditOutcome {
        if !confirm(CLEAR_CONFIRMATION) {
            return EditOutcome::Declined;
        }
        tracing::info!("Clearing scene ({} voxels)", self.voxels.len());
        self.replace_all(Vec::new())
    }
}
