use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        conversion::{
            dto::{ConversionSummary, ConvertRequest, ConvertResponse, VoiceResponse},
            ConversionRequest, ConversionService, ConversionServiceApi,
        },
        tts::{DEFAULT_VOICE, VOICES},
    },
    error::{AppError, AppResult},
    infrastructure::storage::ArtifactKind,
};

pub const MAX_TEXT_LENGTH: usize = 200_000;
pub const MAX_TITLE_LENGTH: usize = 120;
pub const DEFAULT_TITLE: &str = "TextToVideo Project";
const RECENT_CONVERSIONS: i64 = 20;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\-]").unwrap());

pub struct ConversionController {
    conversion_service: Arc<ConversionService>,
}

impl ConversionController {
    pub fn new(conversion_service: Arc<ConversionService>) -> Self {
        Self { conversion_service }
    }

    /// POST /api/convert - Turn text into narrated audio and video
    pub async fn convert(
        State(controller): State<Arc<ConversionController>>,
        Json(request): Json<ConvertRequest>,
    ) -> AppResult<Json<ConvertResponse>> {
        let request = validate(request)?;

        let conversion = controller
            .conversion_service
            .run_conversion(request)
            .await
            .map_err(AppError::from)?;

        Ok(Json(ConvertResponse::from(conversion)))
    }

    /// GET /api/conversions - Most recent conversions
    pub async fn list_conversions(
        State(controller): State<Arc<ConversionController>>,
    ) -> AppResult<Json<Vec<ConversionSummary>>> {
        let conversions = controller
            .conversion_service
            .list_recent(RECENT_CONVERSIONS)
            .await
            .map_err(AppError::from)?;

        Ok(Json(conversions.into_iter().map(ConversionSummary::from).collect()))
    }

    /// GET /api/conversions/:id/audio
    pub async fn download_audio(
        State(controller): State<Arc<ConversionController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        controller.download(id, ArtifactKind::Audio).await
    }

    /// GET /api/conversions/:id/video
    pub async fn download_video(
        State(controller): State<Arc<ConversionController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        controller.download(id, ArtifactKind::Video).await
    }

    /// GET /api/voices - Supported voices
    pub async fn list_voices() -> Json<Vec<VoiceResponse>> {
        Json(
            VOICES
                .iter()
                .map(|v| VoiceResponse {
                    code: v.code.to_string(),
                    label: v.label.to_string(),
                })
                .collect(),
        )
    }

    async fn download(&self, id: Uuid, kind: ArtifactKind) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let artifact = self
            .conversion_service
            .download(id, kind)
            .await
            .map_err(AppError::from)?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(kind.content_type()));
        let disposition = format!(
            "attachment; filename=\"{}.{}\"",
            attachment_name(&artifact.title),
            kind.extension()
        );
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }

        Ok((StatusCode::OK, headers, Body::from(artifact.bytes)))
    }
}

fn validate(request: ConvertRequest) -> AppResult<ConversionRequest> {
    let text_length = request.text.chars().count();
    if text_length == 0 {
        return Err(AppError::BadRequest("Text cannot be empty".to_string()));
    }
    if text_length > MAX_TEXT_LENGTH {
        return Err(AppError::PayloadTooLarge(
            "Text must be 200,000 characters or less".to_string(),
        ));
    }

    let title = match request.title {
        Some(title) => title.trim().to_string(),
        None => DEFAULT_TITLE.to_string(),
    };
    if title.is_empty() {
        return Err(AppError::BadRequest("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::BadRequest(
            "Title must be 120 characters or less".to_string(),
        ));
    }

    Ok(ConversionRequest {
        text: request.text,
        voice: request.voice.unwrap_or_else(|| DEFAULT_VOICE.to_string()),
        title,
    })
}

/// Title with every char outside `[A-Za-z0-9-]` replaced by `_`
fn attachment_name(title: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(title, "_").into_owned()
}
