// src/ingest/types.rs
use anyhow::Result;

use crate::snippet::Snippet;

/// One web source able to produce candidate snippets for a topic.
///
/// Implementations may fail freely; `SourceAdapter` turns every failure into
/// an empty contribution.
#[async_trait::async_trait]
pub trait SnippetSource: Send + Sync {
    async fn fetch_snippets(&self, topic: &str) -> Result<Vec<Snippet>>;
    fn name(&self) -> &'static str;
    /// Source-specific cap on returned items.
    fn max_items(&self) -> usize {
        15
    }
}
