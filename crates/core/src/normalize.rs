//! Text cleanup for model-generated markup.
//!
//! Handles whitespace normalization, Unicode composition, markdown marker
//! stripping, and unwrapping of fenced structured payloads.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse runs of whitespace into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex matching a payload wrapped in a markdown code fence, with an optional
/// language tag after the opening fence.
static CODE_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?```$").unwrap());

/// Title used when an outline has no usable first line.
pub const DEFAULT_PRESENTATION_TITLE: &str = "AI Generated Presentation";

/// Clean a single title or bullet.
///
/// - Composes Unicode to NFC so visually identical text compares equal
/// - Collapses whitespace runs (including tabs) to single spaces
/// - Trims leading/trailing whitespace
pub fn clean_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    WHITESPACE_COLLAPSE_REGEX
        .replace_all(&composed, " ")
        .trim()
        .to_string()
}

/// Strip every leading `#` from a heading line and clean what remains.
pub fn strip_heading_marker(line: &str) -> String {
    clean_text(line.trim_start_matches('#'))
}

/// Count the leading `#` characters of a line.
pub fn heading_level(line: &str) -> usize {
    line.chars().take_while(|&c| c == '#').count()
}

/// Unwrap a payload the model wrapped in a ```` ``` ```` fence.
///
/// Text without a surrounding fence is returned trimmed but otherwise intact.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match CODE_FENCE_REGEX.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

/// Derive a presentation title from outline markup.
///
/// Uses the first non-blank line with its heading marker removed.
pub fn derive_title(outline: &str) -> String {
    outline
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|l| clean_text(l.trim_start_matches(|c| c == '#' || c == ' ')))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_PRESENTATION_TITLE.to_string())
}

/// Turn a title into a lowercase, dash-separated file stem.
pub fn slugify(title: &str) -> String {
    let slug = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "presentation".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Hello \t  world  "), "Hello world");
        assert_eq!(clean_text("\tone\ttwo\t"), "one two");
    }

    #[test]
    fn test_clean_text_composes_unicode() {
        // "e" followed by a combining acute accent
        let decomposed = "Cafe\u{0301}";
        assert_eq!(clean_text(decomposed), "Caf\u{00E9}");
    }

    #[test]
    fn test_strip_heading_marker() {
        assert_eq!(strip_heading_marker("# Topic"), "Topic");
        assert_eq!(strip_heading_marker("###   Deep  dive"), "Deep dive");
        assert_eq!(strip_heading_marker("#"), "");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("# A"), 1);
        assert_eq!(heading_level("## A"), 2);
        assert_eq!(heading_level("#### A"), 4);
        assert_eq!(heading_level("- A"), 0);
    }

    #[test]
    fn test_strip_code_fence() {
        let fenced = "```json\n{\"slides\": []}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"slides\": []}");

        let bare_fence = "```\n{}\n```";
        assert_eq!(strip_code_fence(bare_fence), "{}");

        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("# My Talk\n## Intro"), "My Talk");
        assert_eq!(derive_title("\n\n## Second level first\n"), "Second level first");
        assert_eq!(derive_title("Plain first line"), "Plain first line");
    }

    #[test]
    fn test_derive_title_blank_outline() {
        assert_eq!(derive_title(""), DEFAULT_PRESENTATION_TITLE);
        assert_eq!(derive_title("   \n  "), DEFAULT_PRESENTATION_TITLE);
        assert_eq!(derive_title("###"), DEFAULT_PRESENTATION_TITLE);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust in Production!"), "rust-in-production");
        assert_eq!(slugify("  "), "presentation");
    }
}
