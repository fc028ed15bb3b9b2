//! Save/load of the editable state
//!
//! The whole editable state is one JSON blob under [`STORAGE_KEY`]. History
//! and the preview are not saved; loading restarts history from the loaded
//! scene.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{Language, Tool, Voxel};
use thiserror::Error;

use super::EditorState;

/// Key of the saved editor state
pub const STORAGE_KEY: &str = "vox-cassette-state";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved state is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("saved state is not a JSON object")]
    NotAnObject,
}

/// Key-value storage for opaque blobs
pub trait BlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one raw entry, e.g. a hand-written payload
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory
    pub fn default_location() -> Option<Self> {
        directories::ProjectDirs::from("com", "voxcassette", "vox-cassette")
            .map(|dirs| Self::new(dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Persisted editor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableSnapshot {
    pub voxels: Vec<Voxel>,
    pub current_tool: Tool,
    pub current_color: String,
    pub language: Language,
    pub grid_size: u32,
    pub show_outlines: bool,
}

/// Which fields a load applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredFields {
    pub voxels: bool,
    pub tool: bool,
    pub color: bool,
    pub language: bool,
    pub grid_size: bool,
    pub show_outlines: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing saved under the key; state untouched
    Absent,
    Restored(RestoredFields),
}

impl EditorState {
    pub fn snapshot(&self) -> EditableSnapshot {
        EditableSnapshot {
            voxels: self.scene.voxels().to_vec(),
            current_tool: self.tools.tool,
            current_color: self.tools.color().to_string(),
            language: self.display.language,
            grid_size: self.tools.grid_size(),
            show_outlines: self.display.show_outlines,
        }
    }

    /// Write the editable state to `store`, replacing any earlier save
    pub fn save(&self, store: &mut dyn BlobStore) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&self.snapshot())?;
        store.write(STORAGE_KEY, &json)?;
        tracing::info!("Saved state ({} voxels)", self.scene.len());
        Ok(())
    }

    /// Restore state from `store`.
    ///
    /// A payload that is not a JSON object leaves everything untouched and
    /// returns an error; otherwise every present, well-formed field is applied.
    pub fn load(&mut self, store: &dyn BlobStore) -> Result<LoadOutcome, PersistenceError> {
        let result = store
            .read(STORAGE_KEY)
            .and_then(|saved| match saved {
                Some(json) => self.restore_json(&json).map(LoadOutcome::Restored),
                None => Ok(LoadOutcome::Absent),
            });
        if let Err(e) = &result {
            tracing::warn!("Failed to load state: {e}");
        }
        result
    }

    /// Apply the fields of a saved payload
    pub fn restore_json(&mut self, json: &str) -> Result<RestoredFields, PersistenceError> {
        let Value::Object(map) = serde_json::from_str::<Value>(json)? else {
            return Err(PersistenceError::NotAnObject);
        };

        let mut restored = RestoredFields::default();

        if let Some(tool) = field::<Tool>(&map, "currentTool") {
            self.tools.tool = tool;
            restored.tool = true;
        }
        if let Some(color) = field::<String>(&map, "currentColor").filter(|c| !c.is_empty()) {
            match self.tools.set_color(&color) {
                Ok(()) => restored.color = true,
                Err(e) => tracing::warn!("Ignoring saved currentColor: {e}"),
            }
        }
        if let Some(language) = field::<Language>(&map, "language") {
            self.display.language = language;
            restored.language = true;
        }
        if let Some(size) = field::<u32>(&map, "gridSize").filter(|s| *s > 0) {
            self.tools.set_grid_size(size);
            restored.grid_size = true;
        }
        if let Some(show) = field::<bool>(&map, "showOutlines") {
            self.display.show_outlines = show;
            restored.show_outlines = true;
        }
        if let Some(voxels) = field::<Vec<Voxel>>(&map, "voxels") {
            let voxels = first_per_position(voxels);
            tracing::info!("Loaded {} voxels", voxels.len());
            self.scene.load(voxels);
            restored.voxels = true;
        }

        Ok(restored)
    }
}

/// Keep the first voxel at each position, preserving order
fn first_per_position(voxels: Vec<Voxel>) -> Vec<Voxel> {
    let total = voxels.len();
    let mut seen = HashSet::with_capacity(total);
    let kept: Vec<Voxel> = voxels.into_iter().filter(|v| seen.insert(v.position)).collect();
    if kept.len() < total {
        tracing::warn!("Dropped {} saved voxels at duplicate positions", total - kept.len());
    }
    kept
}

/// Deserialize one optional field, logging and skipping it when malformed
fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Ignoring saved field '{key}': {e}");
            None
        }
    }
}
