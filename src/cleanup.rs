//! Text-cleaning utilities shared by the tree walker.
//!
//! Covers decorative-glyph stripping, whitespace collapsing, markup escaping,
//! code-text normalization, and heading permalink trimming. Code text is the
//! one payload that must never be glyph-stripped.

use regex::Regex;
use std::sync::LazyLock;

/// Matches pictographic glyphs (emoji), emoji variation selectors, and the
/// zero-width joiner used to compose emoji sequences.
static PICTOGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\x{FE0F}\x{200D}]+")
        .expect("BUG: hardcoded pictograph regex is invalid")
});

/// Remove decorative pictographic glyphs, leaving all other text untouched.
pub fn strip_pictographs(text: &str) -> String {
    PICTOGRAPH_RE.replace_all(text, "").into_owned()
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape the markup metacharacters `&`, `<`, `>` for the renderer's
/// rich-text mini-markup.
pub fn escape_markup(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Truncate heading text at the first literal `#`. Source markup sometimes
/// embeds a stray permalink marker after the heading text.
pub fn truncate_at_permalink(text: &str) -> &str {
    match text.find('#') {
        Some(idx) => &text[..idx],
        None => text,
    }
}

/// Normalize pre-formatted code text: drop leading and trailing blank lines,
/// strip trailing whitespace from each line, re-join with `\n`.
///
/// Interior blank lines and all leading indentation are preserved exactly.
pub fn normalize_code_text(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let Some(start) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let end = lines.iter().rposition(|line| !line.is_empty()).unwrap_or(start);
    lines[start..=end].join("\n")
}
