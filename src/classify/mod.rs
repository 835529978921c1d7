//! The `Classify(text) -> (positive, negative)` capability and its plumbing.
//!
//! Classifiers take `&mut self`: they are not assumed safe for concurrent
//! use. `ClassifierLane` owns one instance and serializes every call.

pub mod lane;
pub mod lexicon;
pub mod remote;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ClassifierConfig;

pub use lane::ClassifierLane;
pub use lexicon::LexiconClassifier;
pub use remote::RemoteClassifier;

/// Positive / negative scores, each in [0,1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Polarity {
    pub positive: f32,
    pub negative: f32,
}

impl Polarity {
    pub fn new(positive: f32, negative: f32) -> Self {
        Self {
            positive: clamp01(positive),
            negative: clamp01(negative),
        }
    }

    /// Larger of the two scores.
    pub fn confidence(&self) -> f32 {
        self.positive.max(self.negative)
    }
}

#[async_trait::async_trait]
pub trait Classifier: Send + 'static {
    async fn classify(&mut self, text: &str) -> Result<Polarity>;
    fn name(&self) -> &'static str;
}

/// Pick `positive` / `negative` scores out of a labelled category list.
/// Labels match case-insensitively; anything else is ignored and a missing
/// label scores 0.
pub fn polarity_from_labels<'a, I>(categories: I) -> Polarity
where
    I: IntoIterator<Item = (&'a str, f32)>,
{
    let mut pos = 0.0f32;
    let mut neg = 0.0f32;
    for (label, score) in categories {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => pos = score,
            "negative" | "neg" => neg = score,
            _ => {}
        }
    }
    Polarity::new(pos, neg)
}

/// Build the configured classifier, falling back to the lexicon classifier
/// when the remote one cannot be used.
pub fn build_classifier(cfg: &ClassifierConfig) -> Box<dyn Classifier> {
    match cfg.provider.as_str() {
        "remote" => match RemoteClassifier::from_config(cfg) {
            Ok(c) => {
                info!(endpoint = c.endpoint(), "using remote classifier");
                Box::new(c)
            }
            Err(e) => {
                warn!(error = ?e, "remote classifier unavailable, using lexicon fallback");
                Box::new(LexiconClassifier::new())
            }
        },
        "lexicon" | "" => Box::new(LexiconClassifier::new()),
        other => {
            warn!(provider = other, "unknown classifier provider, using lexicon");
            Box::new(LexiconClassifier::new())
        }
    }
}

fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
