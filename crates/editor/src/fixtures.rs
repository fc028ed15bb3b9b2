//! Factory functions for creating test data.
//!
//! Provides helpers to construct voxels, generation responses and saved
//! payloads used in tests and by the command interface.

use shared::{GeneratedVoxel, Voxel};

use crate::generation::{GenerateFuture, GenerationError, VoxelGenerator};

// ── Voxel factories ─────────────────────────────────────────────

/// Voxels along +X starting at the origin
pub fn voxel_row(n: i32, color: &str) -> Vec<Voxel> {
    (0..n).map(|x| Voxel::new([x, 0, 0], color)).collect()
}

/// Solid `n×n×n` cube of voxels at the origin
pub fn voxel_cube(n: i32, color: &str) -> Vec<Voxel> {
    let mut voxels = Vec::new();
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                voxels.push(Voxel::new([x, y, z], color));
            }
        }
    }
    voxels
}

// ── Generation factories ────────────────────────────────────────

pub fn generated(x: i32, y: i32, z: i32, color: &str) -> GeneratedVoxel {
    GeneratedVoxel {
        x,
        y,
        z,
        color: color.to_string(),
    }
}

/// Generated entries along +Y (a small tower)
pub fn generated_row(n: i32, color: &str) -> Vec<GeneratedVoxel> {
    (0..n).map(|y| generated(0, y, 0, color)).collect()
}

/// Generator answering every prompt with the same voxels
pub struct FixedGenerator {
    voxels: Vec<GeneratedVoxel>,
}

impl FixedGenerator {
    pub fn new(voxels: Vec<GeneratedVoxel>) -> Self {
        Self { voxels }
    }
}

impl VoxelGenerator for FixedGenerator {
    fn generate(&self, _prompt: &str, _grid_size: u32) -> GenerateFuture {
        let voxels = self.voxels.clone();
        Box::pin(async move { Ok(voxels) })
    }
}

/// Generator that always fails
pub struct FailingGenerator;

impl VoxelGenerator for FailingGenerator {
    fn generate(&self, _prompt: &str, _grid_size: u32) -> GenerateFuture {
        Box::pin(async { Err(GenerationError::Other("service unavailable".into())) })
    }
}

// ── Saved payloads ──────────────────────────────────────────────

/// Saved state as written by an earlier session
pub fn saved_state_json() -> String {
    serde_json::json!({
        "voxels": [
            { "position": [0, 0, 0], "color": "#ff0000" },
            { "position": [1, 0, 0], "color": "#00ff00" }
        ],
        "currentTool": "ERASER",
        "currentColor": "#ffb000",
        "language": "cn",
        "gridSize": 24,
        "showOutlines": false
    })
    .to_string()
}
