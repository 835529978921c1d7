//! # Dashboard Aggregator
//! Runs the topic analyzer over a fixed category list and folds the
//! per-category averages into one snapshot.
//!
//! Rules:
//! - a category with no snippets at all is omitted,
//! - a category whose snippets all failed the scorer is kept, zero-valued,
//! - overall averages are the plain mean of the recorded category averages,
//! - categories are ordered by average positive, highest first.
//!
//! A snapshot is assembled only after every category finished; cancelled
//! builds never produce one.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use metrics::{counter, gauge};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::analyzer::TopicAnalyzer;
use crate::config::DashboardConfig;
use crate::error::{validate_topic, PulseError, PulseResult};
use crate::metrics::{ensure_described, DASHBOARD_BUILDS, DASHBOARD_LAST_BUILD_TS};
use crate::snippet::Snippet;

/// Category label used when nothing was recorded.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub items: Vec<Snippet>,
    pub average_positive: f32,
    pub average_negative: f32,
    /// Items that cleared the scorer (0 for a zero-valued category).
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSentiment {
    pub avg_positive: f32,
    pub avg_negative: f32,
    pub total_items: usize,
    pub most_positive_category: String,
    pub most_negative_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub categories: Vec<CategorySummary>,
    pub overall: OverallSentiment,
    pub generated_at: DateTime<Utc>,
}

/// Fold recorded categories (in category-list order) into a snapshot.
pub fn assemble(recorded: Vec<CategorySummary>, generated_at: DateTime<Utc>) -> DashboardSnapshot {
    let n = recorded.len();
    let (avg_positive, avg_negative) = if n == 0 {
        (0.0, 0.0)
    } else {
        let sp: f32 = recorded.iter().map(|c| c.average_positive).sum();
        let sn: f32 = recorded.iter().map(|c| c.average_negative).sum();
        (sp / n as f32, sn / n as f32)
    };

    let overall = OverallSentiment {
        avg_positive,
        avg_negative,
        total_items: recorded.iter().map(|c| c.total_items).sum(),
        most_positive_category: first_max_by(&recorded, |c| c.average_positive),
        most_negative_category: first_max_by(&recorded, |c| c.average_negative),
    };

    let mut categories = recorded;
    categories.sort_by(|a, b| b.average_positive.total_cmp(&a.average_positive));

    DashboardSnapshot {
        categories,
        overall,
        generated_at,
    }
}

/// Name of the first category holding the maximum score.
fn first_max_by(cats: &[CategorySummary], score: impl Fn(&CategorySummary) -> f32) -> String {
    let mut best: Option<&CategorySummary> = None;
    for c in cats {
        match best {
            Some(b) if score(c) <= score(b) => {}
            _ => best = Some(c),
        }
    }
    best.map(|c| c.name.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub struct DashboardAggregator {
    analyzer: TopicAnalyzer,
    cfg: DashboardConfig,
}

impl DashboardAggregator {
    pub fn new(analyzer: TopicAnalyzer, cfg: DashboardConfig) -> Self {
        Self { analyzer, cfg }
    }

    pub fn categories(&self) -> &[String] {
        &self.cfg.categories
    }

    /// Snapshot over the configured categories.
    pub async fn build(&self) -> DashboardSnapshot {
        self.build_dashboard(&self.cfg.categories).await
    }

    pub async fn build_dashboard(&self, categories: &[String]) -> DashboardSnapshot {
        ensure_described();
        let concurrency = self.cfg.concurrency.max(1);

        // `buffered` keeps category-list order whatever finishes first.
        let outcomes: Vec<Option<CategorySummary>> = stream::iter(categories.iter().cloned())
            .map(|name| self.summarize_category(name))
            .buffered(concurrency)
            .collect()
            .await;
        let recorded: Vec<CategorySummary> = outcomes.into_iter().flatten().collect();

        let snapshot = assemble(recorded, Utc::now());
        counter!(DASHBOARD_BUILDS).increment(1);
        gauge!(DASHBOARD_LAST_BUILD_TS).set(snapshot.generated_at.timestamp() as f64);
        info!(
            requested = categories.len(),
            recorded = snapshot.categories.len(),
            most_positive = %snapshot.overall.most_positive_category,
            most_negative = %snapshot.overall.most_negative_category,
            "dashboard built"
        );
        snapshot
    }

    /// Like `build_dashboard`, but abandons the whole build once `cancel`
    /// resolves.
    pub async fn build_dashboard_cancellable<F>(
        &self,
        categories: &[String],
        cancel: F,
    ) -> PulseResult<DashboardSnapshot>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => Err(PulseError::Cancelled),
            snap = self.build_dashboard(categories) => Ok(snap),
        }
    }

    async fn summarize_category(&self, name: String) -> Option<CategorySummary> {
        let name = match validate_topic(&name) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "skipping category");
                return None;
            }
        };

        let mut items = self.analyzer.collector().collect(&name).await;
        if items.is_empty() {
            return None;
        }
        items.truncate(self.cfg.items_per_category);

        let result = self.analyzer.analyze_snippets(&name, &items).await;
        let summary = if result.is_insufficient() {
            CategorySummary {
                name,
                items,
                average_positive: 0.0,
                average_negative: 0.0,
                total_items: 0,
            }
        } else {
            CategorySummary {
                name,
                items,
                average_positive: result.average_positive,
                average_negative: result.average_negative,
                total_items: result.items_analyzed,
            }
        };
        Some(summary)
    }
}

/// Rebuild the dashboard every `every` and publish each complete snapshot.
///
/// The first build starts immediately. The task stops when `shutdown` is
/// set to `true` (or its sender is dropped) or when every snapshot receiver
/// is gone; a build in progress at shutdown is discarded.
pub fn spawn_refresher(
    aggregator: Arc<DashboardAggregator>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> (JoinHandle<()>, watch::Receiver<Option<Arc<DashboardSnapshot>>>) {
    let (tx, rx) = watch::channel(None);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                _ = stopped(&mut shutdown) => break,
                _ = ticker.tick() => {}
            }

            let snapshot = tokio::select! {
                biased;
                _ = stopped(&mut shutdown) => break,
                snap = aggregator.build() => snap,
            };

            if tx.send(Some(Arc::new(snapshot))).is_err() {
                break;
            }
        }
        info!("dashboard refresher stopped");
    });

    (handle, rx)
}

async fn stopped(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
