pub mod assembler;
pub mod chunker;
pub mod language;

pub use assembler::{AudioArtifact, AudioAssembler};
pub use chunker::{chunk_text, normalize_whitespace, TextSegment, MAX_SEGMENT_LENGTH};
pub use language::{find_voice, voice_label, LanguageCode, Voice, DEFAULT_VOICE, VOICES};
