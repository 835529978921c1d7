// src/ingest/providers/google_news.rs
use anyhow::Result;
use async_trait::async_trait;

use super::{parse_rss_items, Mode};
use crate::ingest::clean_text;
use crate::ingest::types::SnippetSource;
use crate::snippet::Snippet;

pub const GOOGLE_NEWS_RSS_URL: &str = "https://news.google.com/rss/search";
const MAX_ITEMS: usize = 15;

/// Google News search feed. Content is synthesized as
/// `"Source: {publisher} - {title}"` since the feed carries no summary text.
pub struct GoogleNewsProvider {
    mode: Mode,
}

impl GoogleNewsProvider {
    pub fn http(client: reqwest::Client) -> Self {
        Self::with_url(client, GOOGLE_NEWS_RSS_URL)
    }

    pub fn with_url(client: reqwest::Client, url: &str) -> Self {
        Self {
            mode: Mode::Http {
                client,
                url: url.to_string(),
            },
        }
    }

    pub fn from_fixture(xml: &str) -> Self {
        Self {
            mode: Mode::Fixture(xml.to_string()),
        }
    }

    pub fn parse(xml: &str) -> Result<Vec<Snippet>> {
        let items = parse_rss_items(xml, "google news")?;
        let mut out = Vec::with_capacity(items.len().min(MAX_ITEMS));
        for it in items {
            let raw_title = clean_text(it.title.as_deref().unwrap_or_default());
            let publisher = it
                .source
                .and_then(|s| s.name)
                .map(|s| clean_text(&s))
                .unwrap_or_default();
            let title = strip_publisher_suffix(&raw_title, &publisher);
            if title.is_empty() {
                continue;
            }
            let content = format!("Source: {publisher} - {title}");
            out.push(Snippet::new(title, content));
            if out.len() >= MAX_ITEMS {
                break;
            }
        }
        Ok(out)
    }
}

/// Google appends " - Publisher" to every headline.
fn strip_publisher_suffix(title: &str, publisher: &str) -> String {
    if publisher.is_empty() {
        return title.to_string();
    }
    title
        .strip_suffix(publisher)
        .and_then(|t| t.trim_end().strip_suffix('-'))
        .map(|t| t.trim_end().to_string())
        .unwrap_or_else(|| title.to_string())
}

#[async_trait]
impl SnippetSource for GoogleNewsProvider {
    async fn fetch_snippets(&self, topic: &str) -> Result<Vec<Snippet>> {
        let body = self
            .mode
            .body(
                "google news",
                &[("q", topic), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")],
            )
            .await?;
        Self::parse(&body)
    }

    fn name(&self) -> &'static str {
        "google_news"
    }

    fn max_items(&self) -> usize {
        MAX_ITEMS
    }
}
