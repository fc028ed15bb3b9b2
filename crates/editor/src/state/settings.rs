//! Display settings

use serde::{Deserialize, Serialize};
use shared::Language;

/// Presentation flags that travel with the saved state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// UI language
    pub language: Language,
    /// Draw voxel edge outlines
    pub show_outlines: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            language: Language::En,
            show_outlines: true,
        }
    }
}

impl DisplaySettings {
    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }

    pub fn toggle_outlines(&mut self) -> bool {
        self.show_outlines = !self.show_outlines;
        self.show_outlines
    }
}
