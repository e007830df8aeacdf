//! Dictionary-based French → English query translation.
//!
//! Translation is deliberately shallow: multi-word expressions are replaced
//! first (longest first), then each remaining token is looked up with its
//! punctuation stripped. Unknown words pass through untouched, so a query is
//! never lost, only left partially translated.

mod dictionary;

use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Output of a single translation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// Translated, stop-word-filtered query.
    pub translated: String,
    /// Keywords from both the original and translated query, deduplicated.
    pub keywords: Vec<String>,
}

/// French → English query translator backed by static term tables.
#[derive(Debug, Clone)]
pub struct TermTranslator {
    terms: HashMap<&'static str, &'static str>,
    /// Sorted longest source phrase first, so overlapping phrases resolve to
    /// the most specific one.
    expressions: Vec<(&'static str, &'static str)>,
    stop_words: HashSet<&'static str>,
}

impl Default for TermTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl TermTranslator {
    #[must_use]
    pub fn new() -> Self {
        let mut expressions = dictionary::EXPRESSIONS.to_vec();
        expressions.sort_by_key(|(source, _)| std::cmp::Reverse(source.chars().count()));

        Self {
            terms: dictionary::TERMS.iter().copied().collect(),
            expressions,
            stop_words: dictionary::STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Translate a free-text query.
    ///
    /// Returns an empty string for blank input. Sparse results (two tokens or
    /// fewer after filtering) are padded with generic domain anchors.
    #[must_use]
    pub fn translate_query(&self, query: &str) -> String {
        let mut text = query.trim().to_lowercase();
        if text.is_empty() {
            return String::new();
        }

        for (source, target) in &self.expressions {
            if text.contains(source) {
                text = text.replace(source, target);
            }
        }

        let words: Vec<&str> = text
            .split_whitespace()
            .map(|word| {
                let clean = clean_token(word);
                self.terms.get(clean.as_str()).copied().unwrap_or(word)
            })
            .collect();

        let translated = self.optimize(&words);
        trace!(query, translated = %translated, "translated query");
        translated
    }

    /// Translate and collect keywords in one pass.
    #[must_use]
    pub fn translate(&self, query: &str) -> Translation {
        let translated = self.translate_query(query);
        let keywords = merge_keywords(extract_keywords(query), extract_keywords(&translated));
        Translation {
            translated,
            keywords,
        }
    }

    /// Keywords from the original query and its translation, deduplicated,
    /// original-language terms first.
    #[must_use]
    pub fn multilingual_keywords(&self, query: &str) -> Vec<String> {
        self.translate(query).keywords
    }

    fn optimize(&self, words: &[&str]) -> String {
        let mut kept: Vec<&str> = words
            .iter()
            .flat_map(|word| word.split_whitespace())
            .filter(|word| word.chars().count() > 2 && !self.stop_words.contains(word))
            .collect();

        if kept.len() <= 2 {
            kept.extend_from_slice(dictionary::DOMAIN_ANCHORS);
        }
        kept.join(" ")
    }
}

/// Lowercase `text`, treat punctuation as whitespace and keep tokens longer
/// than two characters. Order is preserved and duplicates are kept.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) || c.is_whitespace() { c } else { ' ' })
        .collect();

    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Strip everything but word characters. Accented letters count as word
/// characters, so `"sécurité,"` cleans to `"sécurité"`.
#[must_use]
pub fn clean_token(token: &str) -> String {
    token.chars().filter(|c| is_word_char(*c)).collect()
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn merge_keywords(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> TermTranslator {
        TermTranslator::new()
    }

    #[test]
    fn translates_single_terms() {
        let t = translator();
        assert_eq!(
            t.translate_query("portefeuille diversifié croissance"),
            "portfolio diversified growth"
        );
    }

    #[test]
    fn accented_tokens_with_punctuation_are_looked_up() {
        let t = translator();
        let out = t.translate_query("préparer ma retraite en toute sécurité,");
        assert_eq!(out, "préparer retirement toute security");
    }

    #[test]
    fn expressions_win_over_words() {
        let t = translator();
        let out = t.translate_query("Gestion de patrimoine et allocation d'actifs");
        assert_eq!(out, "wealth management asset allocation");
    }

    #[test]
    fn longest_expression_is_applied_first() {
        let t = translator();
        // "épargne retraite" and "retraite" overlap; the phrase must win.
        let out = t.translate_query("épargne retraite long terme");
        assert!(out.contains("retirement savings"), "got {out}");
    }

    #[test]
    fn multi_word_expression_is_translated() {
        let t = translator();
        let out = t.translate_query("matières premières volatiles aujourd'hui");
        assert!(out.starts_with("commodities"), "got {out}");
    }

    #[test]
    fn sparse_query_gets_domain_anchors() {
        let t = translator();
        assert_eq!(t.translate_query("risque"), "risk portfolio wealth management");
        assert_eq!(
            t.translate_query("le or"),
            "gold portfolio wealth management"
        );
    }

    #[test]
    fn blank_query_translates_to_empty() {
        let t = translator();
        assert_eq!(t.translate_query(""), "");
        assert_eq!(t.translate_query("   "), "");
        assert!(t.multilingual_keywords("").is_empty());
    }

    #[test]
    fn unknown_words_pass_through() {
        let t = translator();
        assert_eq!(
            t.translate_query("xyz123 unknown gibberish"),
            "xyz123 unknown gibberish"
        );
    }

    #[test]
    fn extract_keywords_drops_short_tokens_and_punctuation() {
        assert_eq!(
            extract_keywords("Le risque, c'est la vie!"),
            vec!["risque", "est", "vie"]
        );
        assert!(extract_keywords("a b c").is_empty());
    }

    #[test]
    fn multilingual_keywords_are_a_deduplicated_union() {
        let t = translator();
        let keywords = t.multilingual_keywords("préparer ma retraite en toute sécurité");
        assert_eq!(
            keywords,
            vec![
                "préparer",
                "retraite",
                "toute",
                "sécurité",
                "retirement",
                "security"
            ]
        );
    }

    #[test]
    fn translation_carries_keywords() {
        let t = translator();
        let translation = t.translate("allocation de portefeuille");
        assert_eq!(translation.translated, "allocation portfolio portfolio wealth management");
        assert!(translation.keywords.contains(&"portefeuille".to_string()));
        assert!(translation.keywords.contains(&"portfolio".to_string()));
        let unique: HashSet<_> = translation.keywords.iter().collect();
        assert_eq!(unique.len(), translation.keywords.len());
    }

    #[test]
    fn clean_token_keeps_accents() {
        assert_eq!(clean_token("sécurité,"), "sécurité");
        assert_eq!(clean_token("(risque)"), "risque");
        assert_eq!(clean_token("!!"), "");
    }
}
