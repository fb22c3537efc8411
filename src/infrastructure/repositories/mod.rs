pub mod conversion_repository;
pub mod google_tts_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod tts_repository;

pub use conversion_repository::{ConversionRepository, PgConversionRepository};
pub use google_tts_repository::GoogleTtsRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use tts_repository::TtsRepository;
