//! # Sentiment Scorer
//! Wraps the classification lane with three gates:
//! 1. length: texts of `min_text_chars` characters or fewer are skipped,
//! 2. classifier failure: mapped to a rejection, never propagated,
//! 3. confidence: `max(positive, negative) <= min_confidence` is rejected.

use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::{ClassifierLane, Polarity};
use crate::config::ScorerConfig;
use crate::metrics::{ensure_described, SCORER_ACCEPTED, SCORER_REJECTED};
use crate::snippet::{preview_of, ScoredSnippet, Snippet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    TooShort,
    ClassifierFailed,
    LowConfidence,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::TooShort => "too_short",
            Rejection::ClassifierFailed => "classifier_failed",
            Rejection::LowConfidence => "low_confidence",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Accepted(ScoredSnippet),
    Rejected(Rejection),
}

impl ScoreOutcome {
    pub fn accepted(self) -> Option<ScoredSnippet> {
        match self {
            ScoreOutcome::Accepted(s) => Some(s),
            ScoreOutcome::Rejected(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct SentimentScorer {
    lane: ClassifierLane,
    cfg: ScorerConfig,
}

impl SentimentScorer {
    pub fn new(lane: ClassifierLane, cfg: ScorerConfig) -> Self {
        Self { lane, cfg }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.cfg
    }

    pub fn classifier_name(&self) -> &'static str {
        self.lane.classifier_name()
    }

    /// Raw classification, no gates. Used for personal messages.
    pub async fn classify(&self, text: &str) -> anyhow::Result<Polarity> {
        self.lane.classify(text).await
    }

    /// Score a snippet's combined `"{title}. {content}"` text.
    pub async fn score_snippet(&self, snippet: &Snippet) -> ScoreOutcome {
        self.score(&snippet.title, &snippet.combined_text()).await
    }

    pub async fn score(&self, title: &str, text: &str) -> ScoreOutcome {
        ensure_described();
        let outcome = self.gate(title, text).await;
        match &outcome {
            ScoreOutcome::Accepted(_) => counter!(SCORER_ACCEPTED).increment(1),
            ScoreOutcome::Rejected(r) => {
                counter!(SCORER_REJECTED, "reason" => r.as_str()).increment(1)
            }
        }
        outcome
    }

    async fn gate(&self, title: &str, text: &str) -> ScoreOutcome {
        if text.chars().count() <= self.cfg.min_text_chars {
            return ScoreOutcome::Rejected(Rejection::TooShort);
        }

        let polarity = match self.lane.classify(text).await {
            Ok(p) => p,
            Err(e) => {
                warn!(error = ?e, classifier = self.lane.classifier_name(), "classification failed");
                return ScoreOutcome::Rejected(Rejection::ClassifierFailed);
            }
        };

        let confidence = polarity.confidence();
        if confidence <= self.cfg.min_confidence {
            debug!(title, confidence, "below confidence gate");
            return ScoreOutcome::Rejected(Rejection::LowConfidence);
        }

        ScoreOutcome::Accepted(ScoredSnippet {
            title: title.to_string(),
            positive: polarity.positive,
            negative: polarity.negative,
            preview: preview_of(text, self.cfg.preview_chars),
            confidence,
        })
    }
}
