//! Undo/redo functionality

use shared::Voxel;

use super::SceneState;

/// Maximum number of snapshots kept
pub const HISTORY_CAPACITY: usize = 20;

/// Linear, bounded snapshot log with a cursor.
///
/// Entries are owned copies of the scene; nothing is shared with the live
/// voxel list. Recording after an undo drops every entry past the cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<Voxel>>,
    step: usize,
}

impl History {
    /// Log holding a single entry
    pub fn new(initial: &[Voxel]) -> Self {
        Self {
            entries: vec![initial.to_vec()],
            step: 0,
        }
    }

    /// Append a snapshot after the cursor, evicting the oldest past capacity
    pub fn record(&mut self, snapshot: &[Voxel]) {
        self.entries.truncate(self.step + 1);
        self.entries.push(snapshot.to_vec());
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.remove(0);
        }
        self.step = self.entries.len() - 1;
    }

    /// Step back; `None` when already at the oldest entry
    pub fn undo(&mut self) -> Option<&[Voxel]> {
        if self.step == 0 {
            return None;
        }
        self.step -= 1;
        Some(&self.entries[self.step])
    }

    /// Step forward; `None` when already at the newest entry
    pub fn redo(&mut self) -> Option<&[Voxel]> {
        if self.step + 1 >= self.entries.len() {
            return None;
        }
        self.step += 1;
        Some(&self.entries[self.step])
    }

    /// Replace the log with a single entry
    pub fn reset(&mut self, initial: &[Voxel]) {
        self.entries = vec![initial.to_vec()];
        self.step = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    pub fn can_redo(&self) -> bool {
        self.step + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn entries(&self) -> &[Vec<Voxel>] {
        &self.entries
    }

    pub fn current(&self) -> &[Voxel] {
        &self.entries[self.step]
    }
}

impl SceneState {
    /// Undo last change
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.voxels = snapshot.to_vec();
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.voxels = snapshot.to_vec();
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
