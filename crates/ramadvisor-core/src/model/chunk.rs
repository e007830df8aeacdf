use serde::{Deserialize, Serialize};

/// One retrievable knowledge-base passage.
///
/// Field names follow the knowledge JSON produced by the embedding scripts
/// (`topic_category`, `page_number`, `relevance_keywords`). A chunk whose
/// `text` is missing deserializes with an empty text; the JSON loader turns
/// records that fail to decode into such empty chunks. The engine drops
/// them at initialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default)]
    pub text: String,

    /// Classification tag such as `"Asset Allocation"` or `"Risk Management"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_category: Option<String>,

    /// Source page, kept for citation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    /// Pre-extracted salient terms.
    #[serde(
        default,
        rename = "relevance_keywords",
        alias = "keywords",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub keywords: Vec<String>,

    /// Stored vector. May be longer than the engine's working dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Set by the enrichment script when source-language terms were appended.
    #[serde(default)]
    pub enriched_with_french: bool,
}

impl Chunk {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.topic_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// The chunk's category, or `fallback` when it has none.
    #[must_use]
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.topic_category.as_deref().unwrap_or(fallback)
    }

    /// Whether the chunk's category equals `category`.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.topic_category.as_deref() == Some(category)
    }

    /// A chunk is usable when it has non-blank text.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
