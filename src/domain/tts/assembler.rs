use super::chunker::{chunk_text, MAX_SEGMENT_LENGTH};
use super::language::LanguageCode;
use crate::domain::conversion::ConversionError;
use crate::infrastructure::repositories::TtsRepository;
use crate::infrastructure::storage::{ArtifactKind, ArtifactLedger, ArtifactStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// A finished audio file covering the whole input text
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub segment_count: usize,
}

/// Turns arbitrary-length text into one MP3 file.
///
/// Segments are synthesized strictly one after another and appended in input
/// order; segment N+1 is never requested before segment N has been written.
pub struct AudioAssembler {
    tts_repo: Arc<dyn TtsRepository>,
    store: Arc<ArtifactStore>,
    max_segment_length: usize,
}

impl AudioAssembler {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, store: Arc<ArtifactStore>) -> Self {
        Self {
            tts_repo,
            store,
            max_segment_length: MAX_SEGMENT_LENGTH,
        }
    }

    pub fn with_max_segment_length(mut self, max_segment_length: usize) -> Self {
        self.max_segment_length = max_segment_length;
        self
    }

    /// Synthesize `text` with `voice` into a new audio artifact.
    ///
    /// The file is registered in `ledger` before the first byte is written, so
    /// a failure part-way leaves the caller able to remove it.
    pub async fn assemble(
        &self,
        text: &str,
        voice: &str,
        ledger: &mut ArtifactLedger,
    ) -> Result<AudioArtifact, ConversionError> {
        let start_time = std::time::Instant::now();
        let language = LanguageCode::from_voice(voice);
        let filename = self.store.generate_filename(ArtifactKind::Audio);
        let path = self.store.path_for(ArtifactKind::Audio, &filename);

        ledger.track(ArtifactKind::Audio, filename.clone());
        let mut file = tokio::fs::File::create(&path).await?;

        let segments = chunk_text(text, self.max_segment_length);
        let segment_count = segments.len();
        let mut size_bytes: u64 = 0;

        tracing::info!(
            filename = %filename,
            language = %language,
            segment_count,
            text_length = text.len(),
            "Assembling audio"
        );

        for segment in segments {
            let audio = self
                .tts_repo
                .synthesize(segment.as_str(), language)
                .await
                .map_err(|message| ConversionError::Synthesis {
                    segment: segment.index(),
                    message,
                })?;

            if audio.is_empty() && !segment.is_empty() {
                return Err(ConversionError::Synthesis {
                    segment: segment.index(),
                    message: "backend returned no audio".to_string(),
                });
            }

            file.write_all(&audio).await?;
            size_bytes += audio.len() as u64;

            tracing::debug!(
                segment_index = segment.index(),
                segment_length = segment.char_len(),
                total_audio_size = size_bytes,
                "Segment appended"
            );
        }

        file.flush().await?;
        file.sync_all().await?;

        tracing::info!(
            filename = %filename,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = size_bytes,
            "Audio assembled"
        );

        Ok(AudioArtifact {
            filename,
            path,
            size_bytes,
            segment_count,
        })
    }
}
