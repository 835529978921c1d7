// src/lib.rs
// Public library surface: topic analysis and the trending dashboard.

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod mood;
pub mod query;
pub mod scorer;
pub mod snippet;

// ---- Re-exports for stable public API ----
pub use crate::analyzer::{TopicAnalysis, TopicAnalyzer, TopicResult};
pub use crate::classify::{Classifier, ClassifierLane, Polarity};
pub use crate::config::PulseConfig;
pub use crate::dashboard::{CategorySummary, DashboardAggregator, DashboardSnapshot};
pub use crate::error::{PulseError, PulseResult};
pub use crate::ingest::types::SnippetSource;
pub use crate::ingest::Collector;
pub use crate::scorer::{SentimentScorer, ScoreOutcome};
pub use crate::snippet::{ScoredSnippet, Snippet};

/// Analyzer + dashboard wired from one config. Must be called inside a
/// tokio runtime (the classifier lane is spawned here).
pub fn build_pipeline(cfg: &PulseConfig) -> anyhow::Result<(TopicAnalyzer, DashboardAggregator)> {
    let analyzer = TopicAnalyzer::from_config(cfg)?;
    let dashboard = DashboardAggregator::new(analyzer.clone(), cfg.dashboard.clone());
    Ok((analyzer, dashboard))
}
