// src/ingest/mod.rs
pub mod collector;
pub mod providers;
pub mod types;

use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures::FutureExt;
use metrics::{counter, histogram};
use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::{debug, warn};

use crate::ingest::types::SnippetSource;
use crate::metrics::{
    ensure_described, SOURCE_ERRORS, SOURCE_FETCH_MS, SOURCE_ITEMS, SOURCE_TIMEOUTS,
};
use crate::snippet::Snippet;

pub use collector::Collector;

const MAX_TEXT_CHARS: usize = 1000;

/// Normalize scraped text: decode entities, strip tags, unify quotes,
/// collapse whitespace, trim, cap length.
pub fn clean_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > MAX_TEXT_CHARS {
        out = out.chars().take(MAX_TEXT_CHARS).collect();
    }
    out
}

/// Failure boundary around one `SnippetSource`.
///
/// `fetch` never fails: errors, panics and timeouts all yield an empty list.
/// The timeout only cuts off this source's in-flight fetch.
pub struct SourceAdapter {
    source: Box<dyn SnippetSource>,
    timeout: Duration,
    max_items: usize,
}

impl SourceAdapter {
    pub fn new(source: Box<dyn SnippetSource>, timeout: Duration, max_items: usize) -> Self {
        let max_items = max_items.min(source.max_items());
        Self {
            source,
            timeout,
            max_items,
        }
    }

    pub fn name(&self) -> &'static str {
        self.source.name()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub async fn fetch(&self, topic: &str) -> Vec<Snippet> {
        ensure_described();
        let name = self.source.name();
        let t0 = Instant::now();

        let guarded = AssertUnwindSafe(self.source.fetch_snippets(topic)).catch_unwind();
        let outcome = tokio::time::timeout(self.timeout, guarded).await;
        histogram!(SOURCE_FETCH_MS, "source" => name).record(t0.elapsed().as_secs_f64() * 1_000.0);

        let raw = match outcome {
            Ok(Ok(Ok(items))) => items,
            Ok(Ok(Err(e))) => {
                warn!(error = ?e, source = name, "source fetch failed");
                counter!(SOURCE_ERRORS, "source" => name).increment(1);
                return Vec::new();
            }
            Ok(Err(_panic)) => {
                warn!(source = name, "source panicked during fetch");
                counter!(SOURCE_ERRORS, "source" => name).increment(1);
                return Vec::new();
            }
            Err(_elapsed) => {
                warn!(source = name, timeout_ms = self.timeout.as_millis() as u64, "source timed out");
                counter!(SOURCE_TIMEOUTS, "source" => name).increment(1);
                return Vec::new();
            }
        };

        let kept: Vec<Snippet> = raw
            .into_iter()
            .filter(|s| !s.title.trim().is_empty())
            .take(self.max_items)
            .collect();

        counter!(SOURCE_ITEMS, "source" => name).increment(kept.len() as u64);
        debug!(source = name, topic, items = kept.len(), "source fetched");
        kept
    }
}
