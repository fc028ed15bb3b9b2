use std::io::{BufRead, Write};
use std::sync::Arc;

use vox_editor_lib::command::{execute_json, execute_json_batch, CommandResponse};
use vox_editor_lib::config::EditorConfig;
use vox_editor_lib::generation::HttpGenerator;
use vox_editor_lib::harness::EditorHarness;
use vox_editor_lib::state::{FileStore, MemoryStore};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vox_editor=info,vox_editor_lib=info".into()),
        )
        .init();

    let config = EditorConfig::load();
    if std::env::args().any(|a| a == "--write-config") {
        match config.save() {
            Some(path) => tracing::info!("Wrote config to {}", path.display()),
            None => tracing::warn!("No config directory available"),
        }
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };

    let mut harness = match store_for(&config) {
        Some(store) => EditorHarness::with_store(Box::new(store)),
        None => {
            tracing::warn!("No data directory available; state will not persist");
            EditorHarness::with_store(Box::new(MemoryStore::new()))
        }
    };

    match HttpGenerator::new(&config.generation) {
        Ok(generator) => {
            tracing::info!("Generation service at {}", generator.endpoint());
            harness = harness.with_generator(Arc::new(generator), runtime.handle().clone());
        }
        Err(e) => tracing::error!("AI generation disabled: {e}"),
    }

    // Restore the last saved session
    let _ = harness.load();

    if let Some(path) = parse_scene_arg() {
        match std::fs::read_to_string(&path) {
            Ok(json) => match harness.load_scene_json(&json) {
                Ok(()) => tracing::info!("Loaded scene from {path} ({} voxels)", harness.voxel_count()),
                Err(e) => tracing::error!("Failed to parse scene JSON from {path}: {e}"),
            },
            Err(e) => tracing::error!("Failed to read scene file {path}: {e}"),
        }
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = if line.starts_with('[') {
            execute_json_batch(&mut harness, line).map(|r| serde_json::to_string(&r))
        } else {
            execute_json(&mut harness, line).map(|r| serde_json::to_string(&r))
        };

        let text = match output {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => error_line(&e.to_string()),
            Err(e) => error_line(&e),
        };

        for note in harness.take_notifications() {
            tracing::info!("{note}");
        }

        if writeln!(stdout, "{text}").and_then(|_| stdout.flush()).is_err() {
            break;
        }
    }
}

fn store_for(config: &EditorConfig) -> Option<FileStore> {
    match &config.storage.data_dir {
        Some(dir) => Some(FileStore::new(dir.clone())),
        None => FileStore::default_location(),
    }
}

fn error_line(msg: &str) -> String {
    let resp = CommandResponse {
        success: false,
        error: Some(msg.to_string()),
        data: None,
    };
    serde_json::to_string(&resp).unwrap_or_default()
}

fn parse_scene_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--scene")
        .and_then(|i| args.get(i + 1).cloned())
}
