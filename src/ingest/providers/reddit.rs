// src/ingest/providers/reddit.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::Mode;
use crate::ingest::clean_text;
use crate::ingest::types::SnippetSource;
use crate::snippet::Snippet;

pub const REDDIT_SEARCH_URL: &str = "https://www.reddit.com/r/news/search.json";
const MAX_ITEMS: usize = 10;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
}

/// r/news search results (JSON listing).
pub struct RedditProvider {
    mode: Mode,
}

impl RedditProvider {
    pub fn http(client: reqwest::Client) -> Self {
        Self::with_url(client, REDDIT_SEARCH_URL)
    }

    pub fn with_url(client: reqwest::Client, url: &str) -> Self {
        Self {
            mode: Mode::Http {
                client,
                url: url.to_string(),
            },
        }
    }

    pub fn from_fixture(json: &str) -> Self {
        Self {
            mode: Mode::Fixture(json.to_string()),
        }
    }

    /// Link posts have no selftext; those fall back to
    /// `"Discussion about {topic}"`.
    pub fn parse(json: &str, topic: &str) -> Result<Vec<Snippet>> {
        let listing: Listing = serde_json::from_str(json).context("parsing reddit listing json")?;
        let mut out = Vec::new();
        for child in listing.data.children.into_iter().take(MAX_ITEMS) {
            let title = clean_text(&child.data.title);
            if title.is_empty() {
                continue;
            }
            let body = clean_text(&child.data.selftext);
            let content = if body.is_empty() {
                format!("Discussion about {topic}")
            } else {
                body
            };
            out.push(Snippet::new(title, content));
        }
        Ok(out)
    }
}

#[async_trait]
impl SnippetSource for RedditProvider {
    async fn fetch_snippets(&self, topic: &str) -> Result<Vec<Snippet>> {
        let body = self
            .mode
            .body(
                "reddit",
                &[("q", topic), ("restrict_sr", "1"), ("sort", "relevance")],
            )
            .await?;
        Self::parse(&body, topic)
    }

    fn name(&self) -> &'static str {
        "reddit"
    }

    fn max_items(&self) -> usize {
        MAX_ITEMS
    }
}
