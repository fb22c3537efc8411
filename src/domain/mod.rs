pub mod conversion;
pub mod preview;
pub mod tts;
pub mod video;
