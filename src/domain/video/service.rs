use crate::domain::conversion::ConversionError;
use crate::domain::preview::PreviewImage;
use crate::domain::tts::AudioArtifact;
use crate::infrastructure::encoders::{EncodeRequest, VideoEncoder};
use crate::infrastructure::storage::{ArtifactKind, ArtifactLedger, ArtifactStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct VideoArtifact {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Drives a [`VideoEncoder`] and owns the files around it: the preview frame
/// is consumed on every path, and the output is tracked before it exists.
pub struct VideoService {
    encoder: Arc<dyn VideoEncoder>,
    store: Arc<ArtifactStore>,
}

impl VideoService {
    pub fn new(encoder: Arc<dyn VideoEncoder>, store: Arc<ArtifactStore>) -> Self {
        Self { encoder, store }
    }

    pub async fn encode(
        &self,
        preview: PreviewImage,
        audio: &AudioArtifact,
        title: &str,
        ledger: &mut ArtifactLedger,
    ) -> Result<VideoArtifact, ConversionError> {
        let start_time = std::time::Instant::now();
        let filename = self.store.generate_filename(ArtifactKind::Video);
        let path = self.store.path_for(ArtifactKind::Video, &filename);
        ledger.track(ArtifactKind::Video, filename.clone());

        let request = EncodeRequest {
            image: preview.path().to_path_buf(),
            audio: audio.path.clone(),
            output: path.clone(),
            title: title.to_string(),
        };

        let result = self.encoder.encode(&request).await;
        preview.discard().await;
        result.map_err(ConversionError::Encoding)?;

        let size_bytes = tokio::fs::metadata(&path).await?.len();
        if size_bytes == 0 {
            return Err(ConversionError::Encoding("encoder produced an empty file".to_string()));
        }

        tracing::info!(
            filename = %filename,
            video_size_bytes = size_bytes,
            latency_ms = start_time.elapsed().as_millis(),
            "Video encoded"
        );

        Ok(VideoArtifact {
            filename,
            path,
            size_bytes,
        })
    }
}
