//! Client side of the voxel generation service.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use shared::{GenerateRequest, GenerateResponse, GeneratedVoxel};
use thiserror::Error;

use crate::config::GenerationConfig;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation service returned status {0}")]
    Status(u16),
    #[error("generation service returned no voxels")]
    Empty,
    #[error("generation task ended without a result")]
    Cancelled,
    #[error("{0}")]
    Other(String),
}

pub type GenerationResult = Result<Vec<GeneratedVoxel>, GenerationError>;

pub type GenerateFuture = Pin<Box<dyn Future<Output = GenerationResult> + Send + 'static>>;

/// Anything that can turn a prompt into candidate voxels
pub trait VoxelGenerator: Send + Sync {
    fn generate(&self, prompt: &str, grid_size: u32) -> GenerateFuture;
}

/// Talks to `POST /api/generate` on the generation service
#[derive(Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerator {
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl VoxelGenerator for HttpGenerator {
    fn generate(&self, prompt: &str, grid_size: u32) -> GenerateFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let request = GenerateRequest {
            prompt: prompt.to_string(),
            grid_size,
        };

        Box::pin(async move {
            let response = client.post(&endpoint).json(&request).send().await?;
            if !response.status().is_success() {
                return Err(GenerationError::Status(response.status().as_u16()));
            }
            let body: GenerateResponse = response.json().await?;
            Ok(body.voxels)
        })
    }
}
