use super::error::{ConversionError, ConversionServiceError};
use super::job::ConversionJob;
use super::model::{Conversion, ConversionRequest};
use crate::domain::preview::{summarize_text, PreviewRenderer, MAX_SUMMARY_LENGTH};
use crate::domain::tts::AudioAssembler;
use crate::domain::video::VideoService;
use crate::infrastructure::encoders::VideoEncoder;
use crate::infrastructure::repositories::{ConversionRepository, TtsRepository};
use crate::infrastructure::storage::{ArtifactKind, ArtifactLedger, ArtifactStore};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// A stored artifact ready to be sent to a client
#[derive(Debug)]
pub struct ArtifactDownload {
    pub title: String,
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
}

pub struct ConversionService {
    conversion_repo: Arc<dyn ConversionRepository>,
    assembler: AudioAssembler,
    renderer: PreviewRenderer,
    video_service: VideoService,
    store: Arc<ArtifactStore>,
    timeout: Option<Duration>,
}

impl ConversionService {
    pub fn new(
        conversion_repo: Arc<dyn ConversionRepository>,
        tts_repo: Arc<dyn TtsRepository>,
        encoder: Arc<dyn VideoEncoder>,
        store: Arc<ArtifactStore>,
        font_dir: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            conversion_repo,
            assembler: AudioAssembler::new(tts_repo, store.clone()),
            renderer: PreviewRenderer::new(store.clone(), font_dir),
            video_service: VideoService::new(encoder, store.clone()),
            store,
            timeout,
        }
    }

    /// Audio, preview and video, in that order. Returns (audio, video) filenames.
    async fn execute(
        &self,
        request: &ConversionRequest,
        ledger: &mut ArtifactLedger,
    ) -> Result<(String, String), ConversionError> {
        self.store.ensure_directories().await?;

        let audio = self
            .assembler
            .assemble(&request.text, &request.voice, ledger)
            .await?;

        let summary = summarize_text(&request.text, MAX_SUMMARY_LENGTH);
        let preview = self.renderer.render(&request.title, &summary).await?;

        let video = self
            .video_service
            .encode(preview, &audio, &request.title, ledger)
            .await?;

        Ok((audio.filename, video.filename))
    }

    async fn execute_with_timeout(
        &self,
        request: &ConversionRequest,
        ledger: &mut ArtifactLedger,
    ) -> Result<(String, String), ConversionError> {
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.execute(request, ledger)).await {
                Ok(result) => result,
                Err(_) => Err(ConversionError::Timeout {
                    secs: limit.as_secs(),
                }),
            },
            None => self.execute(request, ledger).await,
        }
    }

    async fn record_failure(&self, job: &mut ConversionJob, message: String) {
        if let Err(e) = job.fail(message) {
            tracing::error!(conversion_id = %job.id(), error = %e, "Cannot mark conversion failed");
            return;
        }
        if let Err(e) = self.conversion_repo.update(&job.to_update()).await {
            tracing::error!(
                conversion_id = %job.id(),
                error = %e,
                "Failed to record conversion failure"
            );
        }
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Run one conversion to completion and return the COMPLETED record.
    ///
    /// The job record moves PENDING -> PROCESSING -> COMPLETED | FAILED. On
    /// failure every artifact created for the job is removed before the
    /// record is marked FAILED.
    async fn run_conversion(
        &self,
        request: ConversionRequest,
    ) -> Result<Conversion, ConversionServiceError>;

    /// Most recent conversions first
    async fn list_recent(&self, limit: i64) -> Result<Vec<Conversion>, ConversionServiceError>;

    /// Read the audio or video file of a completed conversion
    async fn download(
        &self,
        id: Uuid,
        kind: ArtifactKind,
    ) -> Result<ArtifactDownload, ConversionServiceError>;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    async fn run_conversion(
        &self,
        request: ConversionRequest,
    ) -> Result<Conversion, ConversionServiceError> {
        let start_time = std::time::Instant::now();
        let text_length = i32::try_from(request.text.chars().count())
            .map_err(|_| ConversionServiceError::Invalid("Text is too long".to_string()))?;

        let mut record = self
            .conversion_repo
            .create(&request.title, text_length, &request.voice)
            .await?;
        let id = record.id;

        tracing::info!(
            conversion_id = %id,
            title = %request.title,
            voice = %request.voice,
            text_length,
            "Conversion created"
        );

        let mut job = ConversionJob::new(id, request);
        job.start().map_err(anyhow::Error::from)?;
        if let Err(e) = self.conversion_repo.update(&job.to_update()).await {
            tracing::error!(conversion_id = %id, error = %e, "Failed to record conversion start");
            self.record_failure(&mut job, format!("failed to record processing: {}", e))
                .await;
            return Err(e.into());
        }

        let mut ledger = ArtifactLedger::default();
        let result = self.execute_with_timeout(job.request(), &mut ledger).await;

        let (audio_filename, video_filename) = match result {
            Ok(filenames) => filenames,
            Err(err) => {
                tracing::error!(
                    conversion_id = %id,
                    stage = err.kind(),
                    error = %err,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Conversion failed"
                );
                ledger.cleanup(&self.store).await;
                self.record_failure(&mut job, err.to_string()).await;
                return Err(ConversionServiceError::ProcessingFailed { id, source: err });
            }
        };

        let mut completed = job.clone();
        completed
            .complete(audio_filename, video_filename)
            .map_err(anyhow::Error::from)?;
        let update = completed.to_update();

        if let Err(e) = self.conversion_repo.update(&update).await {
            tracing::error!(conversion_id = %id, error = %e, "Failed to record conversion completion");
            ledger.cleanup(&self.store).await;
            self.record_failure(&mut job, format!("failed to record completion: {}", e))
                .await;
            return Err(e.into());
        }
        ledger.release();
        record.apply(&update);

        tracing::info!(
            conversion_id = %id,
            audio_filename = ?record.audio_filename,
            video_filename = ?record.video_filename,
            latency_ms = start_time.elapsed().as_millis(),
            "Conversion completed"
        );

        Ok(record)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Conversion>, ConversionServiceError> {
        Ok(self.conversion_repo.list_recent(limit).await?)
    }

    async fn download(
        &self,
        id: Uuid,
        kind: ArtifactKind,
    ) -> Result<ArtifactDownload, ConversionServiceError> {
        let conversion = self
            .conversion_repo
            .find_by_id(id)
            .await?
            .ok_or(ConversionServiceError::NotFound)?;

        let filename = match kind {
            ArtifactKind::Audio => conversion.audio_filename.as_deref(),
            ArtifactKind::Video => conversion.video_filename.as_deref(),
            ArtifactKind::Image => None,
        }
        .ok_or(ConversionServiceError::NotFound)?;

        let path = self.store.path_for(kind, filename);
        let bytes = match self.store.read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(conversion_id = %id, kind = %kind, "Artifact missing on disk");
                return Err(ConversionServiceError::NotFound);
            }
            Err(e) => return Err(anyhow::Error::from(e).into()),
        };

        Ok(ArtifactDownload {
            title: conversion.title,
            kind,
            bytes,
        })
    }
}
