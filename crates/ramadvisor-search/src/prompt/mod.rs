//! Prompt-ready rendering of retrieval results.
//!
//! Lengths are counted in characters, not bytes, so truncation never splits
//! a multi-byte character.

use crate::engine::RankedChunk;
use ramadvisor_core::{Chunk, PromptConfig};

/// Appended to a chunk cut short to fit the budget.
const TRUNCATION_SUFFIX: &str = "...\n\n";
/// Characters of context kept before the first match in a preview.
const PREVIEW_LEAD: usize = 50;
const PREVIEW_ELLIPSIS: &str = "...";

/// Renders ranked chunks as a `[category] text` block under a fixed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFormatter {
    header: String,
    empty_sentinel: String,
    default_category: String,
    truncation_margin: usize,
    min_remaining: usize,
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self::from_config(&PromptConfig::default())
    }
}

impl PromptFormatter {
    #[must_use]
    pub fn from_config(config: &PromptConfig) -> Self {
        Self {
            header: config.header.clone(),
            empty_sentinel: config.empty_sentinel.clone(),
            default_category: config.default_category.clone(),
            truncation_margin: config.truncation_margin,
            min_remaining: config.min_remaining,
        }
    }

    #[must_use]
    pub fn format(&self, ranked: &[RankedChunk], max_length: usize) -> String {
        self.format_chunks(ranked.iter().map(|result| result.chunk.as_ref()), max_length)
    }

    /// Render chunks in order until `max_length` characters are used.
    ///
    /// A chunk that does not fit whole is cut, suffixed with an ellipsis and
    /// ends the block, provided more than the configured minimum of
    /// characters is left; otherwise it is skipped. Apart from a header that
    /// is itself longer than `max_length`, the output never exceeds
    /// `max_length` characters. An empty input yields the "nothing found"
    /// sentinel.
    #[must_use]
    pub fn format_chunks<'a>(
        &self,
        chunks: impl IntoIterator<Item = &'a Chunk>,
        max_length: usize,
    ) -> String {
        let mut chunks = chunks.into_iter().peekable();
        if chunks.peek().is_none() {
            return self.empty_sentinel.clone();
        }

        let mut out = self.header.clone();
        let mut used = out.chars().count();

        for chunk in chunks {
            let prefix = format!("[{}] ", chunk.category_or(&self.default_category));
            let prefix_len = prefix.chars().count();
            let text_len = chunk.text.chars().count();
            let entry_len = prefix_len + text_len + 2;

            if used + entry_len <= max_length {
                out.push_str(&prefix);
                out.push_str(&chunk.text);
                out.push_str("\n\n");
                used += entry_len;
                continue;
            }

            let remaining = max_length.saturating_sub(used);
            let frame = prefix_len + TRUNCATION_SUFFIX.chars().count();
            let budget = remaining.saturating_sub(self.truncation_margin.max(frame));
            // The prefix and suffix alone must fit, with room for some text.
            if remaining > self.min_remaining && frame < remaining && budget > 0 {
                out.push_str(&prefix);
                out.extend(chunk.text.chars().take(budget));
                out.push_str(TRUNCATION_SUFFIX);
            }
            break;
        }

        out.trim().to_string()
    }
}

/// Render with the default header, sentinel and margins.
#[must_use]
pub fn format_knowledge_for_prompt(ranked: &[RankedChunk], max_length: usize) -> String {
    PromptFormatter::default().format(ranked, max_length)
}

/// Excerpt of `text` around the first occurrence of any query word.
///
/// The window starts up to 50 characters before the earliest match (or at
/// the start when nothing matches) and spans `max_len` characters. Leading
/// and trailing `...` mark cut text. Matching is case-insensitive.
#[must_use]
pub fn generate_preview(text: &str, query_words: &[&str], max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lower: Vec<char> = chars.iter().map(|c| fold_case(*c)).collect();

    let first_match = query_words
        .iter()
        .filter_map(|word| {
            let needle: Vec<char> = word.chars().map(fold_case).collect();
            if needle.is_empty() {
                return None;
            }
            lower
                .windows(needle.len())
                .position(|window| window == needle.as_slice())
        })
        .min();

    let start = first_match.map_or(0, |position| position.saturating_sub(PREVIEW_LEAD));
    let end = start.saturating_add(max_len).min(chars.len());

    let mut preview = String::new();
    if start > 0 {
        preview.push_str(PREVIEW_ELLIPSIS);
    }
    preview.extend(&chars[start..end]);
    if end < chars.len() {
        preview.push_str(PREVIEW_ELLIPSIS);
    }
    preview
}

/// Single-character lowercase mapping, so positions in the folded text line
/// up with the original.
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, category: &str) -> Chunk {
        Chunk::new(text).with_category(category)
    }

    #[test]
    fn empty_input_returns_sentinel() {
        let formatter = PromptFormatter::default();
        let out = formatter.format(&[], 2000);
        assert_eq!(out, PromptConfig::default().empty_sentinel);
    }

    #[test]
    fn renders_header_and_tagged_entries() {
        let formatter = PromptFormatter::default();
        let chunks = [
            chunk("Diversify across asset classes.", "Asset Allocation"),
            Chunk::new("Untagged passage."),
        ];
        let out = formatter.format_chunks(&chunks, 2000);
        assert_eq!(
            out,
            "CONNAISSANCE CFA PERTINENTE:\n\n\
             [Asset Allocation] Diversify across asset classes.\n\n\
             [CFA] Untagged passage."
        );
    }

    #[test]
    fn overflowing_chunk_is_truncated_with_ellipsis() {
        let formatter = PromptFormatter::default();
        let long = "x".repeat(500);
        let chunks = [chunk("short", "Risk Management"), chunk(&long, "Asset Allocation")];
        let out = formatter.format_chunks(&chunks, 300);

        assert!(out.ends_with("..."), "got {out}");
        assert!(out.contains("[Asset Allocation] x"));
        assert!(out.chars().count() <= 300);
    }

    #[test]
    fn tiny_remainder_skips_the_chunk() {
        let formatter = PromptFormatter::default();
        let header_len = PromptConfig::default().header.chars().count();
        let chunks = [chunk("brief", "Risk Management"), chunk(&"y".repeat(400), "Asset Allocation")];
        // Only ~60 characters left after the first entry: below the minimum.
        let out = formatter.format_chunks(&chunks, header_len + 80);
        assert!(!out.contains('y'));
        assert!(out.ends_with("[Risk Management] brief"));
    }

    #[test]
    fn oversized_category_prefix_is_not_written() {
        let category = "C".repeat(400);
        let chunks = [chunk(&"word ".repeat(40), &category)];
        let out = PromptFormatter::default().format_chunks(&chunks, 300);
        assert!(out.chars().count() <= 300, "len {}", out.chars().count());
        assert!(!out.contains(&category));
    }

    #[test]
    fn long_prefix_still_truncates_when_it_fits() {
        let category = "C".repeat(150);
        let chunks = [chunk(&"word ".repeat(200), &category)];
        let out = PromptFormatter::default().format_chunks(&chunks, 400);
        assert!(out.chars().count() <= 400, "len {}", out.chars().count());
        assert!(out.contains(&category));
        assert!(out.ends_with("..."));
    }

    #[test]
    fn stops_after_first_truncation() {
        let formatter = PromptFormatter::default();
        let chunks = [
            chunk(&"a".repeat(400), "Asset Allocation"),
            chunk("never shown", "Risk Management"),
        ];
        let out = formatter.format_chunks(&chunks, 250);
        assert!(!out.contains("never shown"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let formatter = PromptFormatter::default();
        let accented = "é".repeat(400);
        let chunks = [chunk(&accented, "Risk Management")];
        let out = formatter.format_chunks(&chunks, 200);
        assert!(out.chars().count() <= 200);
        assert!(out.contains('é'));
    }

    #[test]
    fn preview_centres_on_first_match() {
        let text = format!("{}retirement planning matters{}", "a".repeat(80), "b".repeat(80));
        let preview = generate_preview(&text, &["RETIREMENT"], 60);
        assert!(preview.starts_with("..."));
        assert!(preview.ends_with("..."));
        assert!(preview.contains("retirement"));
        assert_eq!(preview.chars().count(), 60 + 6);
    }

    #[test]
    fn preview_without_match_starts_at_beginning() {
        let preview = generate_preview("short text", &["absent"], 100);
        assert_eq!(preview, "short text");
    }

    #[test]
    fn preview_uses_earliest_of_several_words() {
        let text = "alpha beta gamma";
        let preview = generate_preview(text, &["gamma", "beta", ""], 200);
        assert_eq!(preview, text);
    }
}
