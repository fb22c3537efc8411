pub mod ffmpeg;

pub use ffmpeg::{FfmpegConfig, FfmpegVideoEncoder};

use async_trait::async_trait;
use std::path::PathBuf;

/// Everything an encoder needs to produce one video
#[derive(Debug, Clone)]
pub struct EncodeRequest {
    /// Still frame shown for the whole duration
    pub image: PathBuf,
    pub audio: PathBuf,
    pub output: PathBuf,
    pub title: String,
}

/// Combines a still image and an audio track into an MP4.
///
/// The output's duration is bounded by the audio track. Implementations must
/// leave nothing behind but `request.output`, and may leave a partial output
/// on failure for the caller to remove.
#[async_trait]
pub trait VideoEncoder: Send + Sync {
    async fn encode(&self, request: &EncodeRequest) -> Result<(), String>;
}
