use super::model::{Conversion, ConversionStatus};
use crate::domain::tts::voice_label;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/convert
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Response for POST /api/convert
#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub voice: String,
    pub text_length: i32,
    pub audio_url: String,
    pub video_url: String,
}

/// One entry of GET /api/conversions
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub voice: String,
    pub voice_label: String,
    pub status: ConversionStatus,
    pub text_length: i32,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceResponse {
    pub code: String,
    pub label: String,
}

pub fn audio_url(id: Uuid) -> String {
    format!("/api/conversions/{}/audio", id)
}

pub fn video_url(id: Uuid) -> String {
    format!("/api/conversions/{}/video", id)
}

impl From<Conversion> for ConversionSummary {
    fn from(conversion: Conversion) -> Self {
        Self {
            id: conversion.id,
            audio_url: conversion.audio_filename.as_ref().map(|_| audio_url(conversion.id)),
            video_url: conversion.video_filename.as_ref().map(|_| video_url(conversion.id)),
            title: conversion.title,
            created_at: conversion.created_at,
            voice_label: voice_label(&conversion.voice).to_string(),
            voice: conversion.voice,
            status: conversion.status,
            text_length: conversion.text_length,
            error_message: conversion.error_message,
        }
    }
}

impl From<Conversion> for ConvertResponse {
    fn from(conversion: Conversion) -> Self {
        Self {
            id: conversion.id,
            audio_url: audio_url(conversion.id),
            video_url: video_url(conversion.id),
            title: conversion.title,
            created_at: conversion.created_at,
            voice: conversion.voice,
            text_length: conversion.text_length,
        }
    }
}
