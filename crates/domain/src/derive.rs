//! Title, slug and summary derivation from generated text

/// Title used when the generated text has no non-blank line
pub const DEFAULT_TITLE: &str = "New Wordloom Article";

/// Maximum title length in characters
pub const MAX_TITLE_CHARS: usize = 120;

/// Maximum slug length in characters
pub const MAX_SLUG_CHARS: usize = 60;

/// First non-blank line of `text`, trimmed and cut to [`MAX_TITLE_CHARS`]
pub fn pick_title(text: &str) -> String {
    let Some(first) = text.split('\n').map(str::trim).find(|line| !line.is_empty()) else {
        return DEFAULT_TITLE.to_string();
    };

    let truncated: String = first.chars().take(MAX_TITLE_CHARS).collect();
    // A cut can land right after whitespace
    truncated.trim_end().to_string()
}

/// Lowercase, hyphen-separated slug made of ASCII letters and digits.
///
/// Text is transliterated to ASCII first (`é` becomes `e`). Hyphens,
/// underscores and whitespace act as word separators and each run of them
/// becomes a single `-`. Any other character is dropped, and the result is
/// cut to [`MAX_SLUG_CHARS`].
pub fn slugify(title: &str) -> String {
    let kept: String = deunicode::deunicode(title)
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    let slug = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase();

    slug.chars().take(MAX_SLUG_CHARS).collect()
}

/// Fixed-template cross-post text pointing at the published article
pub fn compose_discussion_text(title: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            "🔥 {}\n\nRead the full article: {}\n\nWhat do you think about this approach?",
            title, url
        ),
        None => format!("🔥 {}\n\nWhat do you think about this approach?", title),
    }
}
