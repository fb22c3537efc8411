/// Maximum number of summary lines drawn on a preview frame
pub const MAX_SUMMARY_LINES: usize = 12;

/// Greedy word wrap. `measure` returns the rendered width of a candidate line.
///
/// A single word wider than `max_width` keeps a line of its own.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Wrap and keep only the first [`MAX_SUMMARY_LINES`] lines
pub fn wrap_summary<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = wrap_text(text, max_width, measure);
    lines.truncate(MAX_SUMMARY_LINES);
    lines
}

/// Longest prefix of `text` (on char boundaries) that fits in `max_width`
pub fn clip_to_width<F>(text: &str, max_width: f32, measure: F) -> String
where
    F: Fn(&str) -> f32,
{
    if measure(text) <= max_width {
        return text.to_string();
    }

    let mut clipped = String::new();
    for c in text.chars() {
        clipped.push(c);
        if measure(&clipped) > max_width {
            clipped.pop();
            break;
        }
    }
    clipped
}
