pub mod fonts;
pub mod renderer;
pub mod wrap;

pub use fonts::FontRegistry;
pub use renderer::{PreviewImage, PreviewRenderer, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use wrap::{clip_to_width, wrap_summary, wrap_text, MAX_SUMMARY_LINES};

/// Maximum length of the summary handed to the renderer
pub const MAX_SUMMARY_LENGTH: usize = 1024;

/// Shorten `text` to at most `max_length` characters, marking the cut with "..."
pub fn summarize_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let keep = max_length.saturating_sub(3);
    let mut summary: String = text.chars().take(keep).collect();
    summary.push_str("...");
    summary
}
