use serde::{Deserialize, Serialize};

pub mod palette;

pub use palette::{
    clamp_grid_size, DEFAULT_COLOR, DEFAULT_GRID_SIZE, MAX_GENERATED_VOXELS, MAX_GRID_SIZE,
    MIN_GRID_SIZE, PALETTE,
};

/// Integer cell coordinate on the voxel grid
pub type GridPos = [i32; 3];

/// A unit cube in the scene. Identity is its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    pub position: GridPos,
    /// Hex RGB, e.g. `#33ff00`
    pub color: String,
}

impl Voxel {
    pub fn new(position: GridPos, color: impl Into<String>) -> Self {
        Self {
            position,
            color: color.into(),
        }
    }
}

/// Editing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Paint,
    Picker,
    Duplicate,
}

impl Tool {
    /// Tag used in persisted state and logs
    pub fn tag(&self) -> &'static str {
        match self {
            Tool::Pencil => "PENCIL",
            Tool::Eraser => "ERASER",
            Tool::Paint => "PAINT",
            Tool::Picker => "PICKER",
            Tool::Duplicate => "DUPLICATE",
        }
    }

    /// All tools in toolbar order
    pub fn all() -> &'static [Tool] {
        &[
            Tool::Pencil,
            Tool::Eraser,
            Tool::Paint,
            Tool::Picker,
            Tool::Duplicate,
        ]
    }
}

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Cn,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Cn,
            Language::Cn => Language::En,
        }
    }
}

/// Pointer click resolved by the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// Click on empty space, resolved to a grid cell
    CellClick { position: GridPos },
    /// Click on an existing voxel; `face_normal` is the outward direction
    /// of the clicked face when the click landed on a face
    VoxelClick {
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        face_normal: Option<GridPos>,
    },
}

/// One entry returned by the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVoxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: String,
}

impl GeneratedVoxel {
    pub fn position(&self) -> GridPos {
        [self.x, self.y, self.z]
    }
}

impl From<GeneratedVoxel> for Voxel {
    fn from(g: GeneratedVoxel) -> Self {
        Voxel {
            position: [g.x, g.y, g.z],
            color: g.color,
        }
    }
}

/// Request body for `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub grid_size: u32,
}

/// Response body for `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub voxels: Vec<GeneratedVoxel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_serde_tags() {
        assert_eq!(serde_json::to_string(&Tool::Pencil).unwrap(), "\"PENCIL\"");
        assert_eq!(serde_json::to_string(&Tool::Duplicate).unwrap(), "\"DUPLICATE\"");
        let t: Tool = serde_json::from_str("\"PICKER\"").unwrap();
        assert_eq!(t, Tool::Picker);
        for tool in Tool::all() {
            let json = serde_json::to_string(tool).unwrap();
            assert_eq!(json, format!("\"{}\"", tool.tag()));
        }
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(serde_json::to_string(&Language::Cn).unwrap(), "\"cn\"");
        assert_eq!(Language::En.toggled(), Language::Cn);
        assert_eq!(Language::Cn.toggled(), Language::En);
    }

    #[test]
    fn test_voxel_click_without_normal() {
        let json = r#"{"type": "voxel_click", "index": 3}"#;
        let ev: InteractionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            ev,
            InteractionEvent::VoxelClick {
                index: 3,
                face_normal: None
            }
        );
    }

    #[test]
    fn test_voxel_shape() {
        let v = Voxel::new([1, 2, 3], "#ff0000");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["position"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["color"], "#ff0000");
    }

    #[test]
    fn test_generated_voxel_into_voxel() {
        let g = GeneratedVoxel {
            x: 1,
            y: 0,
            z: 2,
            color: "#112233".into(),
        };
        assert_eq!(g.position(), [1, 0, 2]);
        let v: Voxel = g.into();
        assert_eq!(v, Voxel::new([1, 0, 2], "#112233"));
    }
}
