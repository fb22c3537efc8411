use crate::domain::tts::LanguageCode;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Translate, AWS Polly, OpenAI, etc.)
///
/// Implementations receive one segment at a time, already sized by the
/// chunker, and return its raw audio bytes (MP3). Segment ordering and
/// concatenation belong to the caller.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one text segment in the given language
    ///
    /// # Arguments
    /// * `segment` - Whitespace-normalized text, possibly empty
    /// * `language` - The target language for synthesis
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable.
    /// An empty segment must succeed with empty audio.
    async fn synthesize(&self, segment: &str, language: LanguageCode) -> Result<Vec<u8>, String>;
}
