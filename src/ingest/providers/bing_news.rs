// src/ingest/providers/bing_news.rs
use anyhow::Result;
use async_trait::async_trait;

use super::{parse_rss_items, Mode};
use crate::ingest::clean_text;
use crate::ingest::types::SnippetSource;
use crate::snippet::Snippet;

pub const BING_NEWS_RSS_URL: &str = "https://www.bing.com/news/search";
const MAX_ITEMS: usize = 10;

pub struct BingNewsProvider {
    mode: Mode,
}

impl BingNewsProvider {
    pub fn http(client: reqwest::Client) -> Self {
        Self::with_url(client, BING_NEWS_RSS_URL)
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

    /// Items without a description fall back to `"News about {topic}"`.
    pub fn parse(xml: &str, topic: &str) -> Result<Vec<Snippet>> {
        let items = parse_rss_items(xml, "bing news")?;
        let mut out = Vec::with_capacity(items.len().min(MAX_ITEMS));
        for it in items.into_iter().take(MAX_ITEMS) {
            let title = clean_text(it.title.as_deref().unwrap_or_default());
            if title.is_empty() {
                continue;
            }
            let description = clean_text(it.description.as_deref().unwrap_or_default());
            let content = if description.is_empty() {
                format!("News about {topic}")
            } else {
                description
            };
            out.push(Snippet::new(title, content));
        }
        Ok(out)
    }
}

#[async_trait]
impl SnippetSource for BingNewsProvider {
    async fn fetch_snippets(&self, topic: &str) -> Result<Vec<Snippet>> {
        let body = self
            .mode
            .body("bing news", &[("q", topic), ("format", "rss")])
            .await?;
        Self::parse(&body, topic)
    }

    fn name(&self) -> &'static str {
        "bing_news"
    }

    fn max_items(&self) -> usize {
        MAX_ITEMS
    }
}
