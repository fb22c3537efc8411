use super::tts_repository::TtsRepository;
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;

const TRANSLATE_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// The public endpoint rejects longer inputs, so each segment is sent in pieces
const MAX_REQUEST_LENGTH: usize = 100;

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    http: reqwest::Client,
    base_url: String,
}

impl GoogleTtsRepository {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, TRANSLATE_TTS_URL)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Call the endpoint for one piece of text
    async fn call_translate_tts(
        &self,
        text: &str,
        language: LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        let textlen = text.chars().count().to_string();
        let idx = index.to_string();
        let total = total.to_string();

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", language.as_str()),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
                ("client", "tw-ob"),
                ("prev", "input"),
                ("ttsspeed", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = %language, "Google TTS request failed");
                format!("Google TTS request error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, language = %language, "Google TTS returned an error status");
            return Err(format!("Google TTS returned status {}", status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS response: {}", e))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, segment: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let pieces = split_for_request(segment, MAX_REQUEST_LENGTH);
        let mut audio = Vec::new();

        for (index, piece) in pieces.iter().enumerate() {
            let bytes = self
                .call_translate_tts(piece, language, index, pieces.len())
                .await?;
            audio.extend(bytes);
        }

        tracing::info!(
            provider = "google",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = segment.len(),
            request_count = pieces.len(),
            audio_size_bytes = audio.len(),
            "Segment synthesized"
        );

        Ok(audio)
    }
}

/// Split text into word-aligned pieces of at most `max_length` characters.
/// Words longer than the limit are cut.
fn split_for_request(text: &str, max_length: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= max_length {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > max_length {
            let chars: Vec<char> = word.chars().collect();
            let mut slices = chars.chunks(max_length).map(|c| c.iter().collect::<String>());
            // the last slice may still take following words
            current = slices.next_back().unwrap_or_default();
            current_len = current.chars().count();
            pieces.extend(slices);
        } else {
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 {
        pieces.push(current);
    }

    pieces
}
