//! # Topic Analyzer
//! Drives Collector + Sentiment Scorer for one topic and reduces the accepted
//! items into averages and top-N exemplars.
//!
//! "Not enough data" (nothing collected, or nothing cleared the scorer) is a
//! value: `TopicResult::insufficient`. Only caller-level problems (bad topic,
//! cancellation) come back as `PulseError`.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::classify::{build_classifier, ClassifierLane};
use crate::config::PulseConfig;
use crate::error::{validate_topic, PulseError, PulseResult};
use crate::ingest::Collector;
use crate::mood::{ConfidenceBand, Mood};
use crate::scorer::SentimentScorer;
use crate::snippet::{ScoredSnippet, Snippet};

/// Value used in every average field of the insufficient result.
pub const INSUFFICIENT: f32 = -1.0;

/// Example previews are only worth showing above this average confidence.
const EXAMPLES_MIN_CONFIDENCE: f32 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicResult {
    pub topic: String,
    pub average_positive: f32,
    pub average_negative: f32,
    pub items_analyzed: usize,
    /// Every accepted item, in snippet order.
    pub breakdown: Vec<ScoredSnippet>,
    pub top_positive: Vec<ScoredSnippet>,
    pub top_negative: Vec<ScoredSnippet>,
    pub average_confidence: f32,
}

impl TopicResult {
    /// Sentinel: averages -1, nothing analyzed. A computed result always
    /// has `items_analyzed >= 1` and averages in [0,1].
    pub fn insufficient(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            average_positive: INSUFFICIENT,
            average_negative: INSUFFICIENT,
            items_analyzed: 0,
            breakdown: Vec::new(),
            top_positive: Vec::new(),
            top_negative: Vec::new(),
            average_confidence: INSUFFICIENT,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.items_analyzed == 0
    }

    pub fn mood(&self) -> Option<Mood> {
        (!self.is_insufficient()).then(|| Mood::from_scores(self.average_positive, self.average_negative))
    }

    pub fn confidence_band(&self) -> Option<ConfidenceBand> {
        (!self.is_insufficient()).then(|| ConfidenceBand::from_confidence(self.average_confidence))
    }

    pub fn show_examples(&self) -> bool {
        !self.is_insufficient() && self.average_confidence > EXAMPLES_MIN_CONFIDENCE
    }
}

/// Result plus the snippets it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicAnalysis {
    pub snippets: Vec<Snippet>,
    pub result: TopicResult,
}

/// Reduce accepted items into a `TopicResult`. Empty input yields the
/// insufficient sentinel.
pub fn summarize(topic: &str, accepted: Vec<ScoredSnippet>, top_n: usize) -> TopicResult {
    if accepted.is_empty() {
        return TopicResult::insufficient(topic);
    }

    let n = accepted.len() as f32;
    let (sum_pos, sum_neg, sum_conf) = accepted.iter().fold((0.0f32, 0.0f32, 0.0f32), |acc, s| {
        (acc.0 + s.positive, acc.1 + s.negative, acc.2 + s.confidence)
    });

    // Stable sorts: equal scores keep snippet order.
    let mut by_pos = accepted.clone();
    by_pos.sort_by(|a, b| b.positive.total_cmp(&a.positive));
    by_pos.truncate(top_n);

    let mut by_neg = accepted.clone();
    by_neg.sort_by(|a, b| b.negative.total_cmp(&a.negative));
    by_neg.truncate(top_n);

    TopicResult {
        topic: topic.to_string(),
        average_positive: sum_pos / n,
        average_negative: sum_neg / n,
        items_analyzed: accepted.len(),
        breakdown: accepted,
        top_positive: by_pos,
        top_negative: by_neg,
        average_confidence: sum_conf / n,
    }
}

#[derive(Clone)]
pub struct TopicAnalyzer {
    collector: Arc<Collector>,
    scorer: SentimentScorer,
}

impl TopicAnalyzer {
    pub fn new(collector: Arc<Collector>, scorer: SentimentScorer) -> Self {
        Self { collector, scorer }
    }

    /// Live sources + configured classifier. Spawns the classifier lane, so
    /// it must run inside a tokio runtime.
    pub fn from_config(cfg: &PulseConfig) -> anyhow::Result<Self> {
        let collector = Arc::new(Collector::from_config(&cfg.sources)?);
        let lane = ClassifierLane::spawn(build_classifier(&cfg.classifier));
        let scorer = SentimentScorer::new(lane, cfg.scorer.clone());
        Ok(Self::new(collector, scorer))
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    pub async fn analyze(&self, topic: &str) -> PulseResult<TopicResult> {
        Ok(self.analyze_detailed(topic).await?.result)
    }

    /// Like `analyze`, but gives up with `PulseError::Cancelled` as soon as
    /// `cancel` resolves. Pending fetches and classifications are dropped.
    pub async fn analyze_cancellable<F>(&self, topic: &str, cancel: F) -> PulseResult<TopicResult>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => Err(PulseError::Cancelled),
            res = self.analyze(topic) => res,
        }
    }

    pub async fn analyze_detailed(&self, topic: &str) -> PulseResult<TopicAnalysis> {
        let topic = validate_topic(topic)?;
        let snippets = self.collector.collect(&topic).await;
        let result = self.analyze_snippets(&topic, &snippets).await;
        Ok(TopicAnalysis { snippets, result })
    }

    /// Score already-collected snippets, one at a time in order.
    pub async fn analyze_snippets(&self, topic: &str, snippets: &[Snippet]) -> TopicResult {
        if snippets.is_empty() {
            return TopicResult::insufficient(topic);
        }

        let mut accepted = Vec::with_capacity(snippets.len());
        for s in snippets {
            if let Some(scored) = self.scorer.score_snippet(s).await.accepted() {
                accepted.push(scored);
            }
        }

        let result = summarize(topic, accepted, self.scorer.config().top_n);
        info!(
            topic,
            collected = snippets.len(),
            analyzed = result.items_analyzed,
            avg_pos = result.average_positive,
            avg_neg = result.average_negative,
            "topic analyzed"
        );
        result
    }
}
