// tests/metrics_pipeline.rs
#![cfg(feature = "strict-metrics")]
mod common;

use common::*;
use metrics_exporter_prometheus::PrometheusBuilder;
use topic_pulse::config::DashboardConfig;
use topic_pulse::ingest::providers::google_news::GoogleNewsProvider;
use topic_pulse::{DashboardAggregator, SnippetSource};

#[tokio::test]
async fn pipeline_series_are_exposed() {
    let handle = PrometheusBuilder::new().install_recorder().expect("recorder");

    let xml = std::fs::read_to_string("tests/fixtures/google_news_rss.xml").expect("fixture");
    let sources: Vec<Box<dyn SnippetSource>> = vec![
        Box::new(GoogleNewsProvider::from_fixture(&xml)),
        Box::new(StaticSource::new("static", &["AI breakthrough announced by research lab"])),
        Box::new(FailingSource),
    ];
    let classifier = ScriptedClassifier::new(&[("breakthrough", 0.8, 0.1)]);
    let cfg = DashboardConfig {
        categories: vec!["AI".into()],
        ..DashboardConfig::default()
    };
    let agg = DashboardAggregator::new(analyzer(sources, classifier), cfg);
    let _ = agg.build().await;

    let out = handle.render();
    assert!(out.contains("pulse_source_items_total"));
    assert!(out.contains("pulse_source_errors_total"));
    assert!(out.contains("pulse_source_fetch_ms"));
    assert!(out.contains("pulse_collect_dedup_total"));
    assert!(out.contains("pulse_scorer_accepted_total"));
    assert!(out.contains("pulse_scorer_rejected_total"));
    assert!(out.contains("pulse_dashboard_builds_total"));
    assert!(out.contains("pulse_dashboard_last_build_ts"));
}
