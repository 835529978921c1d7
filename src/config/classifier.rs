// src/config/classifier.rs
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_CLASSIFIER_API_KEY: &str = "PULSE_CLASSIFIER_API_KEY";

fn default_provider() -> String {
    "lexicon".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// "lexicon" | "remote" (case-insensitive)
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Inference endpoint for the remote provider.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bearer token. "ENV" means: read from PULSE_CLASSIFIER_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClassifierConfig {
    pub(crate) fn sanitize(&mut self) {
        self.provider = self.provider.trim().to_lowercase();
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        if self
            .endpoint
            .as_deref()
            .is_some_and(|e| e.trim().is_empty())
        {
            self.endpoint = None;
        }
    }

    /// Resolved bearer token, if any. A missing env var resolves to `None`.
    pub fn resolved_api_key(&self) -> Option<String> {
        let raw = self.api_key.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.eq_ignore_ascii_case("env") {
            return env::var(ENV_CLASSIFIER_API_KEY)
                .ok()
                .filter(|k| !k.trim().is_empty());
        }
        Some(raw.to_string())
    }
}
