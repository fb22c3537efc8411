use super::model::{ConversionRequest, ConversionStatus, ConversionUpdate};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {trigger} a conversion in state {from}")]
pub struct InvalidTransition {
    pub from: ConversionStatus,
    pub trigger: &'static str,
}

/// In-memory lifecycle of one conversion.
///
/// `PENDING -> PROCESSING -> COMPLETED | FAILED`, nothing else. Artifact
/// filenames are only exposed once the job is COMPLETED.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    id: Uuid,
    request: ConversionRequest,
    status: ConversionStatus,
    audio_filename: Option<String>,
    video_filename: Option<String>,
    error_message: Option<String>,
}

impl ConversionJob {
    pub fn new(id: Uuid, request: ConversionRequest) -> Self {
        Self {
            id,
            request,
            status: ConversionStatus::Pending,
            audio_filename: None,
            video_filename: None,
            error_message: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    pub fn status(&self) -> ConversionStatus {
        self.status
    }

    pub fn audio_filename(&self) -> Option<&str> {
        self.audio_filename.as_deref()
    }

    pub fn video_filename(&self) -> Option<&str> {
        self.video_filename.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn start(&mut self) -> Result<(), InvalidTransition> {
        self.expect(ConversionStatus::Pending, "start")?;
        self.status = ConversionStatus::Processing;
        Ok(())
    }

    pub fn complete(
        &mut self,
        audio_filename: String,
        video_filename: String,
    ) -> Result<(), InvalidTransition> {
        self.expect(ConversionStatus::Processing, "complete")?;
        self.status = ConversionStatus::Completed;
        self.audio_filename = Some(audio_filename);
        self.video_filename = Some(video_filename);
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), InvalidTransition> {
        self.expect(ConversionStatus::Processing, "fail")?;
        self.status = ConversionStatus::Failed;
        self.error_message = Some(message.into());
        Ok(())
    }

    /// Snapshot of the current state for the job record store
    pub fn to_update(&self) -> ConversionUpdate {
        ConversionUpdate {
            id: self.id,
            status: self.status,
            audio_filename: self.audio_filename.clone(),
            video_filename: self.video_filename.clone(),
            error_message: self.error_message.clone(),
        }
    }

    fn expect(&self, state: ConversionStatus, trigger: &'static str) -> Result<(), InvalidTransition> {
        if self.status == state {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: self.status,
                trigger,
            })
        }
    }
}
