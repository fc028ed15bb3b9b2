//! AI preview workflow
//!
//! A generated candidate set lives here, detached from the scene, until it is
//! committed (replace or append) or discarded. At most one generation request
//! is in flight; a new one can start only from `Idle`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{GeneratedVoxel, Voxel, DEFAULT_COLOR};
use thiserror::Error;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::color::{shift_hue_preserving_lightness, ColorError, Rgb};
use crate::generation::{GenerationError, GenerationResult, VoxelGenerator};

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("a generation request or preview is already active")]
    Busy,
    #[error("no preview is active")]
    NotPreviewing,
    #[error(transparent)]
    InvalidColor(#[from] ColorError),
}

/// How a candidate set is merged into the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitMode {
    Replace,
    Append,
}

/// Generated voxels under review
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCandidate {
    original: Vec<Voxel>,
    working: Vec<Voxel>,
    override_color: Option<String>,
}

impl PreviewCandidate {
    pub fn new(original: Vec<Voxel>) -> Self {
        Self {
            working: original.clone(),
            original,
            override_color: None,
        }
    }

    /// Voxels exactly as generated
    pub fn original(&self) -> &[Voxel] {
        &self.original
    }

    /// Voxels as they will be committed
    pub fn working(&self) -> &[Voxel] {
        &self.working
    }

    pub fn override_color(&self) -> Option<&str> {
        self.override_color.as_deref()
    }

    /// Color shown in the override swatch
    pub fn swatch_color(&self) -> &str {
        self.override_color
            .as_deref()
            .or_else(|| self.original.first().map(|v| v.color.as_str()))
            .unwrap_or(DEFAULT_COLOR)
    }

    /// Rebuild the working copy from the original.
    ///
    /// `None` restores the original colors. A target color gives every voxel
    /// the target hue while keeping its own lightness.
    pub fn recolor(&mut self, target: Option<&str>) -> Result<(), ColorError> {
        let Some(hex) = target else {
            self.working = self.original.clone();
            self.override_color = None;
            return Ok(());
        };

        let target = Rgb::from_hex(hex)?;
        let target_hex = target.to_hex();
        let target_hsl = target.to_hsl();

        self.working = self
            .original
            .iter()
            .map(|voxel| {
                let color = match Rgb::from_hex(&voxel.color) {
                    Ok(rgb) => shift_hue_preserving_lightness(rgb.to_hsl(), target_hsl)
                        .to_rgb()
                        .to_hex(),
                    Err(_) => target_hex.clone(),
                };
                Voxel::new(voxel.position, color)
            })
            .collect();
        self.override_color = Some(target_hex);
        Ok(())
    }
}

/// Request waiting on the generation service
#[derive(Debug)]
pub struct PendingRequest {
    pub prompt: String,
    receiver: Option<oneshot::Receiver<GenerationResult>>,
}

#[derive(Debug, Default)]
pub enum PreviewState {
    #[default]
    Idle,
    Requesting(PendingRequest),
    Previewing(PreviewCandidate),
}

/// Result of resolving a generation request
#[derive(Debug)]
pub enum PreviewOutcome {
    /// Candidate set is ready for review
    Ready { count: usize },
    /// Nothing to preview; the workflow is idle again
    Failed(GenerationError),
    /// No request was outstanding
    Ignored,
}

#[derive(Debug, Default)]
pub struct PreviewWorkflow {
    state: PreviewState,
}

impl PreviewWorkflow {
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// A new prompt may only be submitted from `Idle`
    pub fn can_request(&self) -> bool {
        matches!(self.state, PreviewState::Idle)
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.state, PreviewState::Requesting(_))
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self.state, PreviewState::Previewing(_))
    }

    pub fn candidate(&self) -> Option<&PreviewCandidate> {
        match &self.state {
            PreviewState::Previewing(candidate) => Some(candidate),
            _ => None,
        }
    }

    /// Working copy, or nothing when no preview is active
    pub fn preview_voxels(&self) -> &[Voxel] {
        self.candidate().map(|c| c.working()).unwrap_or(&[])
    }

    /// Enter `Requesting` for `prompt`. The caller delivers the result
    /// through [`complete`](Self::complete).
    pub fn begin_request(&mut self, prompt: &str) -> Result<(), PreviewError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(PreviewError::EmptyPrompt);
        }
        if !self.can_request() {
            return Err(PreviewError::Busy);
        }
        self.state = PreviewState::Requesting(PendingRequest {
            prompt: prompt.to_string(),
            receiver: None,
        });
        Ok(())
    }

    /// Start a generation request on `runtime`; poll for the result with
    /// [`poll`](Self::poll) or [`wait`](Self::wait).
    pub fn request(
        &mut self,
        prompt: &str,
        grid_size: u32,
        generator: Arc<dyn VoxelGenerator>,
        runtime: &tokio::runtime::Handle,
    ) -> Result<(), PreviewError> {
        self.begin_request(prompt)?;
        let PreviewState::Requesting(pending) = &mut self.state else {
            return Err(PreviewError::Busy);
        };

        tracing::info!("Requesting generation for '{}' (grid {})", pending.prompt, grid_size);
        let (tx, rx) = oneshot::channel();
        let future = generator.generate(&pending.prompt, grid_size);
        runtime.spawn(async move {
            let _ = tx.send(future.await);
        });
        pending.receiver = Some(rx);
        Ok(())
    }

    /// Resolve the outstanding request if its result has arrived
    pub fn poll(&mut self) -> Option<PreviewOutcome> {
        let PreviewState::Requesting(pending) = &mut self.state else {
            return None;
        };
        let receiver = pending.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(result) => Some(self.complete(result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(self.complete(Err(GenerationError::Cancelled))),
        }
    }

    /// Wait for the outstanding request to resolve
    pub async fn wait(&mut self) -> Option<PreviewOutcome> {
        let PreviewState::Requesting(pending) = &mut self.state else {
            return None;
        };
        let receiver = pending.receiver.as_mut()?;
        let result = receiver.await.unwrap_or(Err(GenerationError::Cancelled));
        Some(self.complete(result))
    }

    /// Deliver a generation result
    pub fn complete(&mut self, result: GenerationResult) -> PreviewOutcome {
        if !self.is_requesting() {
            tracing::debug!("dropping generation result: no request outstanding");
            return PreviewOutcome::Ignored;
        }

        match result {
            Ok(generated) if !generated.is_empty() => {
                let voxels = candidate_voxels(generated);
                let count = voxels.len();
                tracing::info!("Generation ready: {} voxels", count);
                self.state = PreviewState::Previewing(PreviewCandidate::new(voxels));
                PreviewOutcome::Ready { count }
            }
            Ok(_) => self.fail(GenerationError::Empty),
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: GenerationError) -> PreviewOutcome {
        tracing::warn!("AI generation failed: {error}");
        self.state = PreviewState::Idle;
        PreviewOutcome::Failed(error)
    }

    /// Recolor the candidate, or reset it with `None`
    pub fn recolor(&mut self, target: Option<&str>) -> Result<(), PreviewError> {
        match &mut self.state {
            PreviewState::Previewing(candidate) => Ok(candidate.recolor(target)?),
            _ => Err(PreviewError::NotPreviewing),
        }
    }

    /// Leave `Previewing`, handing back the working copy for commit
    pub fn take_working(&mut self) -> Option<Vec<Voxel>> {
        if !self.is_previewing() {
            return None;
        }
        match std::mem::take(&mut self.state) {
            PreviewState::Previewing(candidate) => Some(candidate.working),
            _ => None,
        }
    }

    /// Drop the candidate without touching the scene
    pub fn discard(&mut self) -> bool {
        if !self.is_previewing() {
            return false;
        }
        self.state = PreviewState::Idle;
        true
    }
}

/// Map service entries to voxels one-to-one
pub fn candidate_voxels(generated: Vec<GeneratedVoxel>) -> Vec<Voxel> {
    generated.into_iter().map(Voxel::from).collect()
}
