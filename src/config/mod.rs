// src/config/mod.rs
//! Runtime configuration. Every field has a default, so an absent or partial
//! file still yields a usable `PulseConfig`.

pub mod classifier;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use classifier::ClassifierConfig;

pub const ENV_CONFIG_PATH: &str = "PULSE_CONFIG_PATH";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MAX_ITEMS_PER_SOURCE: usize = 15;
const DEFAULT_MIN_TEXT_CHARS: usize = 20;
const DEFAULT_MIN_CONFIDENCE: f32 = 0.3;
const DEFAULT_PREVIEW_CHARS: usize = 80;
const DEFAULT_TOP_N: usize = 3;
const DEFAULT_ITEMS_PER_CATEGORY: usize = 8;
const DEFAULT_CONCURRENCY: usize = 2;
const DEFAULT_REFRESH_SECS: u64 = 900;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 topic-pulse/0.1";

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Technology",
    "Politics",
    "Economy",
    "Sports",
    "Entertainment",
    "Health",
    "Science",
    "Climate",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub sources: SourcesConfig,
    pub scorer: ScorerConfig,
    pub dashboard: DashboardConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub timeout_secs: u64,
    pub max_items_per_source: usize,
    pub user_agent: String,
    pub google_news: bool,
    pub reddit: bool,
    pub bing_news: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_items_per_source: DEFAULT_MAX_ITEMS_PER_SOURCE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            google_news: true,
            reddit: true,
            bing_news: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Texts with `chars <= min_text_chars` are skipped.
    pub min_text_chars: usize,
    /// Results with `confidence <= min_confidence` are rejected.
    pub min_confidence: f32,
    pub preview_chars: usize,
    pub top_n: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub categories: Vec<String>,
    pub items_per_category: usize,
    pub concurrency: usize,
    pub refresh_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            items_per_category: DEFAULT_ITEMS_PER_CATEGORY,
            concurrency: DEFAULT_CONCURRENCY,
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl PulseConfig {
    /// Replace out-of-range values with defaults.
    pub fn sanitized(mut self) -> Self {
        let s = &mut self.sources;
        if s.timeout_secs == 0 {
            s.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        if s.max_items_per_source == 0 {
            s.max_items_per_source = DEFAULT_MAX_ITEMS_PER_SOURCE;
        }
        if s.user_agent.trim().is_empty() {
            s.user_agent = DEFAULT_USER_AGENT.to_string();
        }

        let sc = &mut self.scorer;
        if !(0.0..1.0).contains(&sc.min_confidence) {
            sc.min_confidence = DEFAULT_MIN_CONFIDENCE;
        }
        if sc.preview_chars == 0 {
            sc.preview_chars = DEFAULT_PREVIEW_CHARS;
        }
        if sc.top_n == 0 {
            sc.top_n = DEFAULT_TOP_N;
        }

        let d = &mut self.dashboard;
        d.categories = clean_list(std::mem::take(&mut d.categories));
        if d.categories.is_empty() {
            d.categories = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        }
        if d.items_per_category == 0 {
            d.items_per_category = DEFAULT_ITEMS_PER_CATEGORY;
        }
        d.concurrency = d.concurrency.clamp(1, d.categories.len().max(1));
        if d.refresh_secs == 0 {
            d.refresh_secs = DEFAULT_REFRESH_SECS;
        }

        self.classifier.sanitize();
        self
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_from(path: &Path) -> Result<PulseConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str()).map(PulseConfig::sanitized)
}

/// Load config using env var + fallbacks:
/// 1) $PULSE_CONFIG_PATH
/// 2) config/pulse.toml
/// 3) config/pulse.json
/// 4) built-in defaults
pub fn load_default() -> Result<PulseConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        } else {
            return Err(anyhow!("PULSE_CONFIG_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/pulse.toml");
    if toml_p.exists() {
        return load_from(&toml_p);
    }
    let json_p = PathBuf::from("config/pulse.json");
    if json_p.exists() {
        return load_from(&json_p);
    }
    Ok(PulseConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<PulseConfig> {
    let looks_json = s.trim_start().starts_with('{');
    if hint_ext == "json" || (hint_ext != "toml" && looks_json) {
        return serde_json::from_str(s).context("parsing json config");
    }
    match toml::from_str(s) {
        Ok(cfg) => Ok(cfg),
        Err(e) if looks_json => serde_json::from_str(s)
            .with_context(|| format!("config is neither toml ({e}) nor json")),
        Err(e) => Err(e).context("parsing toml config"),
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}
