use super::tts_repository::TtsRepository;
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the appropriate Polly neural voice for a language
    fn get_voice_for_language(language: LanguageCode) -> &'static str {
        match language {
            LanguageCode::English => "Joanna",
            LanguageCode::BrazilianPortuguese => "Camila",
            LanguageCode::Portuguese => "Ines",
            LanguageCode::Spanish => "Lucia",
            LanguageCode::French => "Lea",
            LanguageCode::German => "Vicki",
            LanguageCode::Italian => "Bianca",
        }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, segment: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if segment.trim().is_empty() {
            return Ok(Vec::new());
        }

        let start_time = std::time::Instant::now();
        let voice_name = Self::get_voice_for_language(language);
        let voice_id = VoiceId::from(voice_name);
        let engine = Engine::Neural;

        tracing::debug!(
            language = %language,
            voice = voice_name,
            engine = ?engine,
            text_length = segment.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(segment)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    language = %language,
                    voice = voice_name,
                    engine = ?engine,
                    text_length = segment.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = segment.len(),
            audio_size_bytes = audio_bytes.len(),
            "Segment synthesized"
        );

        Ok(audio_bytes)
    }
}
