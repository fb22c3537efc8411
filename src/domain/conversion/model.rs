use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversion {
    pub id: Uuid,
    pub title: String,
    pub text_length: i32,
    pub voice: String,
    pub status: ConversionStatus,
    pub audio_filename: Option<String>,
    pub video_filename: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ConversionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ConversionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionStatus::Pending => "PENDING",
            ConversionStatus::Processing => "PROCESSING",
            ConversionStatus::Completed => "COMPLETED",
            ConversionStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversionStatus::Completed | ConversionStatus::Failed)
    }
}

impl std::fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of one text-to-video conversion
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub text: String,
    pub voice: String,
    pub title: String,
}

impl Conversion {
    /// Apply a status change to this in-memory copy of the record
    pub fn apply(&mut self, update: &ConversionUpdate) {
        self.status = update.status;
        self.audio_filename = update.audio_filename.clone();
        self.video_filename = update.video_filename.clone();
        self.error_message = update.error_message.clone();
    }
}

/// Status change written to the job record store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionUpdate {
    pub id: Uuid,
    pub status: ConversionStatus,
    pub audio_filename: Option<String>,
    pub video_filename: Option<String>,
    pub error_message: Option<String>,
}
