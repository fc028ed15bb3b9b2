//! Tool dispatch: turns one viewport click into a scene mutation.

use shared::{clamp_grid_size, GridPos, InteractionEvent, Tool, DEFAULT_COLOR, DEFAULT_GRID_SIZE};

use crate::color::{normalize_hex, ColorError};
use crate::state::scene::{EditOutcome, SceneState};

/// Active tool, color and grid size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolState {
    pub tool: Tool,
    color: String,
    grid_size: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: DEFAULT_COLOR.to_string(),
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl ToolState {
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Set the active color; stored as lowercase `#rrggbb`
    pub fn set_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.color = normalize_hex(hex)?;
        Ok(())
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Set the grid size, clamped to the supported range. Returns the
    /// stored value.
    pub fn set_grid_size(&mut self, size: u32) -> u32 {
        self.grid_size = clamp_grid_size(size);
        self.grid_size
    }
}

/// What a click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolEffect {
    /// The click reached the Scene Store
    Edited(EditOutcome),
    /// The picker sampled a color and switched to the pencil
    Picked { color: String },
    /// The tool does nothing for this kind of click
    Ignored,
}

/// Apply `event` with the active tool.
///
/// Only the picker changes `tools`; every other tool touches the scene alone.
pub fn dispatch(tools: &mut ToolState, scene: &mut SceneState, event: InteractionEvent) -> ToolEffect {
    match (tools.tool, event) {
        (Tool::Pencil, InteractionEvent::CellClick { position }) => {
            ToolEffect::Edited(scene.add(position, tools.color.clone()))
        }
        (Tool::Pencil, InteractionEvent::VoxelClick { index, face_normal }) => {
            match adjacent_cell(scene, index, face_normal) {
                Some(position) => ToolEffect::Edited(scene.add(position, tools.color.clone())),
                None => ToolEffect::Ignored,
            }
        }
        (Tool::Eraser, InteractionEvent::VoxelClick { index, .. }) => {
            ToolEffect::Edited(scene.remove(index))
        }
        (Tool::Paint, InteractionEvent::VoxelClick { index, .. }) => {
            ToolEffect::Edited(scene.recolor(index, tools.color.clone()))
        }
        (Tool::Picker, InteractionEvent::VoxelClick { index, .. }) => {
            let Some(voxel) = scene.get(index) else {
                return ToolEffect::Ignored;
            };
            match normalize_hex(&voxel.color) {
                Ok(color) => {
                    tools.color = color;
                    tools.tool = Tool::Pencil;
                    ToolEffect::Picked {
                        color: tools.color.clone(),
                    }
                }
                Err(e) => {
                    tracing::debug!("picker ignored voxel {}: {e}", index);
                    ToolEffect::Ignored
                }
            }
        }
        (Tool::Duplicate, InteractionEvent::VoxelClick { index, face_normal }) => {
            let (Some(position), Some(source)) =
                (adjacent_cell(scene, index, face_normal), scene.get(index))
            else {
                return ToolEffect::Ignored;
            };
            let color = source.color.clone();
            ToolEffect::Edited(scene.add(position, color))
        }
        (Tool::Eraser | Tool::Paint | Tool::Picker | Tool::Duplicate, InteractionEvent::CellClick { .. }) => {
            ToolEffect::Ignored
        }
    }
}

/// Cell next to voxel `index` across the clicked face
fn adjacent_cell(scene: &SceneState, index: usize, face_normal: Option<GridPos>) -> Option<GridPos> {
    let normal = face_normal?;
    if !is_axis_unit(normal) {
        tracing::debug!("ignoring non-axis face normal {:?}", normal);
        return None;
    }
    let origin = scene.get(index)?.position;
    Some([
        origin[0].checked_add(normal[0])?,
        origin[1].checked_add(normal[1])?,
        origin[2].checked_add(normal[2])?,
    ])
}

fn is_axis_unit(v: GridPos) -> bool {
    v.iter().map(|c| c.abs()).sum::<i32>() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Voxel;

    fn voxel_click(index: usize, face_normal: Option<GridPos>) -> InteractionEvent {
        InteractionEvent::VoxelClick { index, face_normal }
    }

    fn tools_with(tool: Tool, color: &str) -> ToolState {
        let mut tools = ToolState::default();
        tools.tool = tool;
        tools.set_color(color).unwrap();
        tools
    }

    #[test]
    fn test_pencil_on_face_places_adjacent() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        let mut tools = tools_with(Tool::Pencil, "#00ff00");

        let effect = dispatch(&mut tools, &mut scene, voxel_click(0, Some([1, 0, 0])));
        assert_eq!(effect, ToolEffect::Edited(EditOutcome::Committed));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.voxels()[1], Voxel::new([1, 0, 0], "#00ff00"));
    }

    #[test]
    fn test_pencil_on_cell() {
        let mut scene = SceneState::default();
        let mut tools = ToolState::default();
        dispatch(&mut tools, &mut scene, InteractionEvent::CellClick { position: [2, 0, 3] });
        assert_eq!(scene.voxels(), &[Voxel::new([2, 0, 3], DEFAULT_COLOR)]);
    }

    #[test]
    fn test_pencil_without_face_is_ignored() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        let mut tools = ToolState::default();
        assert_eq!(dispatch(&mut tools, &mut scene, voxel_click(0, None)), ToolEffect::Ignored);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_pencil_onto_occupied_cell_is_noop() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        scene.add([0, 1, 0], "#ff0000");
        let mut tools = ToolState::default();
        let effect = dispatch(&mut tools, &mut scene, voxel_click(0, Some([0, 1, 0])));
        assert_eq!(effect, ToolEffect::Edited(EditOutcome::Duplicate));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_eraser_removes_clicked_voxel() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        scene.add([1, 0, 0], "#00ff00");
        scene.add([2, 0, 0], "#0000ff");
        let mut tools = tools_with(Tool::Eraser, "#ffffff");

        dispatch(&mut tools, &mut scene, voxel_click(0, Some([0, 1, 0])));
        assert_eq!(
            scene.voxels(),
            &[Voxel::new([1, 0, 0], "#00ff00"), Voxel::new([2, 0, 0], "#0000ff")]
        );
    }

    #[test]
    fn test_cell_click_ignored_by_non_placing_tools() {
        let mut scene = SceneState::default();
        for tool in [Tool::Eraser, Tool::Paint, Tool::Picker, Tool::Duplicate] {
            let mut tools = tools_with(tool, "#ffffff");
            let effect = dispatch(&mut tools, &mut scene, InteractionEvent::CellClick { position: [0, 0, 0] });
            assert_eq!(effect, ToolEffect::Ignored);
            assert_eq!(tools.tool, tool);
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn test_paint_recolors() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        let mut tools = tools_with(Tool::Paint, "#0000ff");
        dispatch(&mut tools, &mut scene, voxel_click(0, None));
        assert_eq!(scene.voxels()[0].color, "#0000ff");
    }

    #[test]
    fn test_picker_samples_and_switches_to_pencil() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#abcdef");
        let mut tools = tools_with(Tool::Picker, "#000000");
        let history = scene.history().len();

        let effect = dispatch(&mut tools, &mut scene, voxel_click(0, None));
        assert_eq!(effect, ToolEffect::Picked { color: "#abcdef".into() });
        assert_eq!(tools.color(), "#abcdef");
        assert_eq!(tools.tool, Tool::Pencil);
        assert_eq!(scene.history().len(), history);
    }

    #[test]
    fn test_picker_on_missing_voxel_keeps_tool() {
        let mut scene = SceneState::default();
        let mut tools = tools_with(Tool::Picker, "#000000");
        assert_eq!(dispatch(&mut tools, &mut scene, voxel_click(4, None)), ToolEffect::Ignored);
        assert_eq!(tools.tool, Tool::Picker);
    }

    #[test]
    fn test_picker_normalizes_sampled_color() {
        let mut scene = SceneState::default();
        scene.append_all(vec![Voxel::new([0, 0, 0], "#ABC"), Voxel::new([1, 0, 0], "not-a-color")]);
        let mut tools = tools_with(Tool::Picker, "#000000");

        let effect = dispatch(&mut tools, &mut scene, voxel_click(0, None));
        assert_eq!(effect, ToolEffect::Picked { color: "#aabbcc".into() });
        assert_eq!(tools.color(), "#aabbcc");

        tools.tool = Tool::Picker;
        assert_eq!(dispatch(&mut tools, &mut scene, voxel_click(1, None)), ToolEffect::Ignored);
        assert_eq!(tools.color(), "#aabbcc");
        assert_eq!(tools.tool, Tool::Picker);
    }

    #[test]
    fn test_duplicate_on_missing_voxel_is_ignored() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        let mut tools = tools_with(Tool::Duplicate, "#00ff00");
        assert_eq!(
            dispatch(&mut tools, &mut scene, voxel_click(3, Some([1, 0, 0]))),
            ToolEffect::Ignored
        );
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_duplicate_copies_source_color() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        let mut tools = tools_with(Tool::Duplicate, "#00ff00");

        dispatch(&mut tools, &mut scene, voxel_click(0, Some([0, 0, -1])));
        assert_eq!(scene.voxels()[1], Voxel::new([0, 0, -1], "#ff0000"));

        assert_eq!(dispatch(&mut tools, &mut scene, voxel_click(0, None)), ToolEffect::Ignored);
    }

    #[test]
    fn test_diagonal_normal_is_ignored() {
        let mut scene = SceneState::default();
        scene.add([0, 0, 0], "#ff0000");
        let mut tools = ToolState::default();
        assert_eq!(
            dispatch(&mut tools, &mut scene, voxel_click(0, Some([1, 1, 0]))),
            ToolEffect::Ignored
        );
    }

    #[test]
    fn test_set_color_and_grid_size() {
        let mut tools = ToolState::default();
        tools.set_color("#ABCDEF").unwrap();
        assert_eq!(tools.color(), "#abcdef");
        assert!(tools.set_color("nope").is_err());
        assert_eq!(tools.color(), "#abcdef");

        assert_eq!(tools.set_grid_size(2), shared::MIN_GRID_SIZE);
        assert_eq!(tools.set_grid_size(32), 32);
        assert_eq!(tools.set_grid_size(1000), shared::MAX_GRID_SIZE);
    }
}
