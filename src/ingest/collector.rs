// src/ingest/collector.rs
//! Concurrent fan-out over all configured sources, merged in priority order.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use metrics::counter;
use tracing::{debug, info};

use crate::config::SourcesConfig;
use crate::ingest::providers::{
    bing_news::BingNewsProvider, google_news::GoogleNewsProvider, reddit::RedditProvider,
};
use crate::ingest::types::SnippetSource;
use crate::ingest::SourceAdapter;
use crate::metrics::{ensure_described, COLLECT_DEDUP};
use crate::snippet::Snippet;

pub struct Collector {
    /// Highest priority first.
    adapters: Vec<SourceAdapter>,
}

impl Collector {
    pub fn new(adapters: Vec<SourceAdapter>) -> Self {
        Self { adapters }
    }

    /// Wrap each source with the same timeout and item cap, keeping the
    /// given order as the priority order.
    pub fn with_sources(
        sources: Vec<Box<dyn SnippetSource>>,
        timeout: Duration,
        max_items: usize,
    ) -> Self {
        let adapters = sources
            .into_iter()
            .map(|s| SourceAdapter::new(s, timeout, max_items))
            .collect();
        Self::new(adapters)
    }

    /// Live HTTP sources in priority order: Google News, Reddit, Bing News.
    pub fn from_config(cfg: &SourcesConfig) -> Result<Self> {
        let timeout = Duration::from_secs(cfg.timeout_secs);
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .connect_timeout(Duration::from_secs(5).min(timeout))
            .timeout(timeout)
            .build()
            .context("building http client")?;

        let mut sources: Vec<Box<dyn SnippetSource>> = Vec::new();
        if cfg.google_news {
            sources.push(Box::new(GoogleNewsProvider::http(client.clone())));
        }
        if cfg.reddit {
            sources.push(Box::new(RedditProvider::http(client.clone())));
        }
        if cfg.bing_news {
            sources.push(Box::new(BingNewsProvider::http(client)));
        }
        Ok(Self::with_sources(sources, timeout, cfg.max_items_per_source))
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(SourceAdapter::name).collect()
    }

    /// Fetch from every source concurrently and merge.
    ///
    /// Output order is adapter priority then source order, regardless of
    /// which source finishes first. An empty result means "no data", not a failure.
    pub async fn collect(&self, topic: &str) -> Vec<Snippet> {
        ensure_described();
        let batches = join_all(self.adapters.iter().map(|a| a.fetch(topic))).await;
        let raw_total: usize = batches.iter().map(Vec::len).sum();

        let (merged, dups) = merge_dedup(batches);
        counter!(COLLECT_DEDUP).increment(dups as u64);

        if merged.is_empty() {
            info!(topic, sources = self.adapters.len(), "no snippets collected");
        } else {
            debug!(topic, raw = raw_total, kept = merged.len(), dups, "collected snippets");
        }
        merged
    }
}

/// Concatenate batches in order and drop later entries whose trimmed title
/// was already seen. Returns (kept, dropped_count).
pub fn merge_dedup(batches: Vec<Vec<Snippet>>) -> (Vec<Snippet>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();
    let mut dups = 0usize;

    for snippet in batches.into_iter().flatten() {
        if seen.insert(snippet.dedup_key().to_string()) {
            kept.push(snippet);
        } else {
            dups += 1;
        }
    }
    (kept, dups)
}
