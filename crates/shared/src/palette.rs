//! Editor constants shared by the editor and the generation service

pub const DEFAULT_GRID_SIZE: u32 = 16;
pub const MIN_GRID_SIZE: u32 = 4;
pub const MAX_GRID_SIZE: u32 = 64;

/// CRT green
pub const DEFAULT_COLOR: &str = "#33ff00";

/// Upper bound on voxels in one generation response
pub const MAX_GENERATED_VOXELS: usize = 50;

pub const PALETTE: [&str; 15] = [
    "#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff",
    "#ffff00", "#ff00ff", "#00ffff", "#ffa500", "#800080",
    "#33ff00", "#ffb000", "#ff6b6b", "#4ecdc4", "#45b7d1",
];

/// Clamp a grid size into the supported range
pub fn clamp_grid_size(size: u32) -> u32 {
    size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}
