// src/ingest/providers/mod.rs
pub mod bing_news;
pub mod google_news;
pub mod reddit;

use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;

/// Where a provider reads its payload from.
pub(crate) enum Mode {
    /// Canned payload, used by tests and offline runs.
    Fixture(String),
    Http {
        client: reqwest::Client,
        url: String,
    },
}

impl Mode {
    /// Return the raw body for `topic`, either the fixture or an HTTP GET
    /// with the given query parameters.
    pub(crate) async fn body(&self, label: &str, query: &[(&str, &str)]) -> Result<String> {
        match self {
            Mode::Fixture(s) => Ok(s.clone()),
            Mode::Http { client, url } => {
                let resp = client
                    .get(url.as_str())
                    .query(query)
                    .send()
                    .await
                    .with_context(|| format!("{label} http get()"))?
                    .error_for_status()
                    .with_context(|| format!("{label} http status"))?;
                resp.text()
                    .await
                    .with_context(|| format!("{label} http .text()"))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RssItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub source: Option<RssSource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RssSource {
    #[serde(rename = "$text")]
    pub name: Option<String>,
}

pub(crate) fn parse_rss_items(xml: &str, label: &str) -> Result<Vec<RssItem>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let rss: Rss = from_str(&xml_clean).with_context(|| format!("parsing {label} rss xml"))?;
    Ok(rss.channel.item)
}

/// XML only knows five named entities; feeds regularly embed HTML ones.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...")
}
