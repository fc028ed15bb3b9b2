//! Integration tests for the editor harness.
//!
//! Exercises the scene, history, tools and persistence through the public API.

use shared::{Tool, Voxel};
use vox_editor_lib::fixtures::{saved_state_json, voxel_row};
use vox_editor_lib::harness::EditorHarness;
use vox_editor_lib::state::{
    EditOutcome, FileStore, LoadOutcome, MemoryStore, ToolEffect, HISTORY_CAPACITY, STORAGE_KEY,
};

fn harness_with_row(n: i32) -> EditorHarness {
    let mut h = EditorHarness::new();
    for v in voxel_row(n, "#ffffff") {
        h.click_cell(v.position);
    }
    h
}

#[test]
fn test_harness_uniqueness_under_repeated_adds() {
    let mut h = EditorHarness::new();
    for i in 0..10 {
        h.click_cell([i % 3, 0, 0]);
    }
    assert_eq!(h.voxel_count(), 3);

    let mut positions: Vec<_> = h.voxels().iter().map(|v| v.position).collect();
    positions.sort();
    positions.dedup();
    assert_eq!(positions.len(), 3);
}

#[test]
fn test_harness_undo_redo_cycle() {
    let mut h = harness_with_row(2);
    assert_eq!(h.voxel_count(), 2);

    assert!(h.undo());
    assert_eq!(h.voxel_count(), 1);

    assert!(h.undo());
    assert_eq!(h.voxel_count(), 0);

    assert!(!h.undo()); // nothing to undo
    assert_eq!(h.voxel_count(), 0);

    assert!(h.redo());
    assert_eq!(h.voxel_count(), 1);

    assert!(h.redo());
    assert_eq!(h.voxel_count(), 2);

    assert!(!h.redo()); // nothing to redo
}

#[test]
fn test_harness_undo_is_inverse_of_each_mutation() {
    let mut h = harness_with_row(3);
    let before = h.voxels().to_vec();

    h.select_tool(Tool::Paint);
    h.set_color("#123456").unwrap();
    h.click_voxel(1, None);
    assert_ne!(h.voxels(), before.as_slice());

    assert!(h.undo());
    assert_eq!(h.voxels(), before.as_slice());

    assert!(h.redo());
    assert_eq!(h.voxels()[1].color, "#123456");
}

#[test]
fn test_harness_branch_discard() {
    let mut h = harness_with_row(2);
    assert!(h.undo());
    h.click_cell([9, 9, 9]);
    assert!(!h.redo());
    assert!(!h.status().can_redo);
}

#[test]
fn test_harness_history_bound() {
    let mut h = EditorHarness::new();
    for x in 0..30 {
        h.click_cell([x, 0, 0]);
    }
    let history = h.state.scene.history();
    assert_eq!(history.len(), HISTORY_CAPACITY);

    let lens: Vec<usize> = history.entries().iter().map(|e| e.len()).collect();
    let expected: Vec<usize> = (11..=30).collect();
    assert_eq!(lens, expected);

    let mut undos = 0;
    while h.undo() {
        undos += 1;
    }
    assert_eq!(undos, HISTORY_CAPACITY - 1);
    assert_eq!(h.voxel_count(), 11);
}

#[test]
fn test_harness_pencil_on_face_scenario() {
    let mut h = EditorHarness::new();
    h.set_color("#ff0000").unwrap();
    h.click_cell([0, 0, 0]);
    h.set_color("#00ff00").unwrap();

    let effect = h.click_voxel(0, Some([1, 0, 0]));
    assert_eq!(effect, ToolEffect::Edited(EditOutcome::Committed));
    assert_eq!(h.voxel_count(), 2);
    assert_eq!(h.voxels()[1], Voxel::new([1, 0, 0], "#00ff00"));
}

#[test]
fn test_harness_eraser_scenario() {
    let mut h = harness_with_row(3);
    let tail = h.voxels()[1..].to_vec();
    h.select_tool(Tool::Eraser);
    h.click_voxel(0, None);
    assert_eq!(h.voxels(), tail.as_slice());
}

#[test]
fn test_harness_picker_then_draw() {
    let mut h = EditorHarness::new();
    h.set_color("#4ecdc4").unwrap();
    h.click_cell([0, 0, 0]);
    h.set_color("#000000").unwrap();

    h.select_tool(Tool::Picker);
    h.click_voxel(0, None);
    assert_eq!(h.status().tool, Tool::Pencil);

    h.click_voxel(0, Some([0, 1, 0]));
    assert_eq!(h.voxels()[1].color, "#4ecdc4");
}

#[test]
fn test_harness_manual_placement_ignores_grid_bounds() {
    let mut h = EditorHarness::new();
    h.set_grid_size(4);
    assert!(matches!(
        h.click_cell([100, -3, 7]),
        ToolEffect::Edited(EditOutcome::Committed)
    ));
}

#[test]
fn test_harness_load_from_empty_store_is_noop() {
    let mut h = harness_with_row(2);
    h.select_tool(Tool::Eraser);
    h.set_color("#abcdef").unwrap();
    h.set_grid_size(40);
    let before = h.status();

    assert_eq!(h.load().unwrap(), LoadOutcome::Absent);
    assert_eq!(h.status(), before);
}

#[test]
fn test_harness_load_saved_state() {
    let store = MemoryStore::with_entry(STORAGE_KEY, &saved_state_json());
    let mut h = EditorHarness::with_store(Box::new(store));
    h.click_cell([5, 5, 5]);

    h.load().unwrap();
    let status = h.status();
    assert_eq!(status.voxel_count, 2);
    assert_eq!(status.tool, Tool::Eraser);
    assert_eq!(status.color, "#ffb000");
    assert_eq!(status.grid_size, 24);
    assert!(!status.can_undo);
    assert!(!h.state.display.show_outlines);
}

#[test]
fn test_harness_corrupt_save_is_absorbed() {
    let store = MemoryStore::with_entry(STORAGE_KEY, "{{{{");
    let mut h = EditorHarness::with_store(Box::new(store));
    h.click_cell([1, 1, 1]);

    assert!(h.load().is_err());
    assert_eq!(h.voxel_count(), 1);
    assert_eq!(h.take_notifications(), vec!["RECALL FAILED.".to_string()]);

    // Still interactive
    h.click_cell([2, 2, 2]);
    assert_eq!(h.voxel_count(), 2);
}

#[test]
fn test_harness_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut h = EditorHarness::with_store(Box::new(FileStore::new(dir.path())));
    h.click_cell([1, 2, 3]);
    h.set_color("#ff6b6b").unwrap();
    h.save().unwrap();

    let mut h2 = EditorHarness::with_store(Box::new(FileStore::new(dir.path())));
    assert!(matches!(h2.load().unwrap(), LoadOutcome::Restored(_)));
    assert_eq!(h2.voxels(), h.voxels());
    assert_eq!(h2.status().color, "#ff6b6b");
}
