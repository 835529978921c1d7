//! Classifier backed by an HTTP inference endpoint.
//!
//! Request: `POST {endpoint}` with `{"inputs": "<text>"}`.
//! Accepted responses:
//! - `[[{"label": "POSITIVE", "score": 0.9}, ...]]` (batched label list)
//! - `[{"label": "POSITIVE", "score": 0.9}, ...]`
//! - `{"positive": 0.9, "negative": 0.1}`

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::{polarity_from_labels, Classifier, Polarity};
use crate::config::ClassifierConfig;

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batched(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Direct { positive: f32, negative: f32 },
}

impl InferenceResponse {
    fn into_polarity(self) -> Result<Polarity> {
        match self {
            InferenceResponse::Batched(mut rows) => {
                if rows.is_empty() {
                    bail!("empty inference batch");
                }
                let first = rows.swap_remove(0);
                Ok(labels(&first))
            }
            InferenceResponse::Flat(row) => Ok(labels(&row)),
            InferenceResponse::Direct { positive, negative } => {
                Ok(Polarity::new(positive, negative))
            }
        }
    }
}

fn labels(row: &[LabelScore]) -> Polarity {
    polarity_from_labels(row.iter().map(|c| (c.label.as_str(), c.score)))
}

/// Parse a raw inference response body.
pub fn parse_inference(body: &str) -> Result<Polarity> {
    let resp: InferenceResponse =
        serde_json::from_str(body).context("parsing inference response")?;
    resp.into_polarity()
}

pub struct RemoteClassifier {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteClassifier {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("topic-pulse/0.1")
            .connect_timeout(Duration::from_secs(4).min(timeout))
            .timeout(timeout)
            .build()
            .context("building classifier http client")?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }

    pub fn from_config(cfg: &ClassifierConfig) -> Result<Self> {
        let endpoint = cfg
            .endpoint
            .as_deref()
            .ok_or_else(|| anyhow!("remote classifier needs an endpoint"))?;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            bail!("classifier endpoint must be an http(s) url");
        }
        Self::new(
            endpoint,
            cfg.resolved_api_key(),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&mut self, text: &str) -> Result<Polarity> {
        #[derive(Serialize)]
        struct Req<'a> {
            inputs: &'a str,
        }

        let mut req = self.http.post(&self.endpoint).json(&Req { inputs: text });
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req
            .send()
            .await
            .context("classifier http post()")?
            .error_for_status()
            .context("classifier http status")?;
        let body = resp.text().await.context("classifier http .text()")?;
        parse_inference(&body)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
