//! Raw and scored text items that flow through the pipeline.

use serde::{Deserialize, Serialize};

/// A title + content pair retrieved from one source.
/// `title` is the dedup key (exact match after trim).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub title: String,
    pub content: String,
}

impl Snippet {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Key used by the collector to collapse duplicates across sources.
    pub fn dedup_key(&self) -> &str {
        self.title.trim()
    }

    /// Text submitted to the classifier: `"{title}. {content}"`.
    pub fn combined_text(&self) -> String {
        format!("{}. {}", self.title, self.content)
    }
}

/// A snippet that cleared every scorer gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSnippet {
    pub title: String,
    /// Positive score in [0,1].
    pub positive: f32,
    /// Negative score in [0,1].
    pub negative: f32,
    /// First characters of the combined text, with a trailing "...".
    pub preview: String,
    /// `max(positive, negative)`.
    pub confidence: f32,
}

/// Build the display preview: the first `max_chars` characters plus "...".
pub fn preview_of(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
