use super::tts_repository::TtsRepository;
use crate::domain::tts::LanguageCode;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// Select the OpenAI voice for a language unless one is configured
    fn voice_for(&self, language: LanguageCode) -> Voice {
        let name = if self.default_voice.is_empty() {
            match language {
                LanguageCode::English => "alloy",
                LanguageCode::Spanish => "echo",
                LanguageCode::French => "nova",
                LanguageCode::German => "onyx",
                LanguageCode::Italian => "fable",
                LanguageCode::Portuguese | LanguageCode::BrazilianPortuguese => "shimmer",
            }
        } else {
            self.default_voice.as_str()
        };

        match name.to_lowercase().as_str() {
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, segment: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if segment.trim().is_empty() {
            return Ok(Vec::new());
        }

        let start_time = std::time::Instant::now();
        let voice = self.voice_for(language);

        tracing::debug!(
            model = %self.model,
            voice = ?voice,
            language = %language,
            text_length = segment.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: segment.to_string(),
            voice,
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = segment.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        let audio_bytes = response.bytes.to_vec();

        tracing::info!(
            provider = "openai",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = segment.len(),
            audio_size_bytes = audio_bytes.len(),
            "Segment synthesized"
        );

        Ok(audio_bytes)
    }
}
