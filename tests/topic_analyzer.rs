// tests/topic_analyzer.rs
mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::*;
use topic_pulse::config::ScorerConfig;
use topic_pulse::{ClassifierLane, PulseError, SentimentScorer, SnippetSource, TopicAnalyzer};

#[tokio::test]
async fn breakthrough_and_fears_average_out() {
    let sources: Vec<Box<dyn SnippetSource>> = vec![
        Box::new(StaticSource::new("google", &["AI breakthrough announced"])),
        Box::new(StaticSource::new("reddit", &["AI jobs fears grow"])),
    ];
    let classifier = ScriptedClassifier::new(&[("breakthrough", 0.8, 0.1), ("fears", 0.1, 0.75)]);
    let a = analyzer(sources, classifier);

    let r = a.analyze("AI").await.unwrap();
    assert_eq!(r.items_analyzed, 2);
    assert!((r.average_positive - 0.45).abs() < 1e-6, "{}", r.average_positive);
    assert!((r.average_negative - 0.425).abs() < 1e-6, "{}", r.average_negative);
    assert!((r.average_confidence - 0.775).abs() < 1e-6);
    assert_eq!(r.top_positive[0].title, "AI breakthrough announced");
    assert_eq!(r.top_negative[0].title, "AI jobs fears grow");
    // Each list holds both items: an item may appear in both.
    assert_eq!(r.top_positive.len(), 2);
    assert_eq!(r.top_negative.len(), 2);
}

#[tokio::test]
async fn no_reachable_sources_gives_the_sentinel() {
    let sources: Vec<Box<dyn SnippetSource>> = vec![Box::new(FailingSource), Box::new(FailingSource)];
    let classifier = ScriptedClassifier::new(&[]);
    let calls = classifier.calls.clone();
    let a = analyzer(sources, classifier);

    let r = a.analyze("AI").await.unwrap();
    assert!(r.is_insufficient());
    assert_eq!(r.items_analyzed, 0);
    assert_eq!(r.average_positive, -1.0);
    assert_eq!(r.average_negative, -1.0);
    assert_eq!(calls.load(Ordering::SeqCst), 0, "nothing to classify");
}

#[tokio::test(start_paused = true)]
async fn all_sources_timing_out_returns_sentinel_within_bound() {
    let sources: Vec<Box<dyn SnippetSource>> = vec![
        Box::new(HangingSource),
        Box::new(HangingSource),
        Box::new(HangingSource),
    ];
    let a = analyzer(sources, ScriptedClassifier::new(&[]));
    let t0 = tokio::time::Instant::now();
    let r = a.analyze("AI").await.unwrap();
    assert!(r.is_insufficient());
    assert!(t0.elapsed() < TIMEOUT + Duration::from_secs(1));
}

#[tokio::test]
async fn everything_below_confidence_gate_gives_the_sentinel() {
    let sources: Vec<Box<dyn SnippetSource>> =
        vec![Box::new(StaticSource::new("s", &["Council meets on Tuesday", "Weather report for today"]))];
    // fallback polarity is (0.2, 0.2) for both
    let a = analyzer(sources, ScriptedClassifier::new(&[]));
    let r = a.analyze("local").await.unwrap();
    assert!(r.is_insufficient());
    assert_eq!(r.average_confidence, -1.0);
}

#[tokio::test]
async fn short_and_failed_items_are_not_counted() {
    let sources: Vec<Box<dyn SnippetSource>> = vec![Box::new(StaticSource {
        name: "s",
        items: vec![
            topic_pulse::Snippet::new("Win", "ok"), // "Win. ok" is 7 chars
            topic_pulse::Snippet::new("MODEL-ERROR headline", "with enough words in it"),
            snip("Record growth breakthrough"),
        ],
        delay: Duration::ZERO,
    })];
    let classifier = ScriptedClassifier::new(&[("Win", 0.9, 0.0), ("growth", 0.7, 0.2)]);
    let calls = classifier.calls.clone();
    let a = analyzer(sources, classifier);

    let r = a.analyze("economy").await.unwrap();
    assert_eq!(r.items_analyzed, 1);
    assert_eq!(r.breakdown[0].title, "Record growth breakthrough");
    assert!((r.average_positive - 0.7).abs() < 1e-6);
    // the short item never reached the classifier
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn top_lists_are_capped_and_sorted() {
    let titles = ["p1 good", "p2 good", "p3 good", "p4 good", "n1 bad", "n2 bad"];
    let sources: Vec<Box<dyn SnippetSource>> = vec![Box::new(StaticSource::new("s", &titles))];
    let classifier = ScriptedClassifier::new(&[
        ("p1", 0.6, 0.3),
        ("p2", 0.9, 0.05),
        ("p3", 0.7, 0.2),
        ("p4", 0.8, 0.1),
        ("n1", 0.2, 0.7),
        ("n2", 0.05, 0.9),
    ]);
    let a = analyzer(sources, classifier);
    let r = a.analyze("things").await.unwrap();

    assert_eq!(r.items_analyzed, 6);
    assert_eq!(r.top_positive.len(), 3);
    assert_eq!(r.top_negative.len(), 3);
    assert!(r.top_positive.windows(2).all(|w| w[0].positive >= w[1].positive));
    assert!(r.top_negative.windows(2).all(|w| w[0].negative >= w[1].negative));
    assert_eq!(r.top_positive[0].title, "p2 good");
    assert_eq!(r.top_negative[0].title, "n2 bad");
    for s in &r.breakdown {
        assert!(s.confidence > 0.3);
        assert_eq!(s.confidence, s.positive.max(s.negative));
    }
}

#[tokio::test]
async fn blank_topic_is_a_caller_error() {
    let a = analyzer(vec![], ScriptedClassifier::new(&[]));
    assert!(matches!(a.analyze("   ").await, Err(PulseError::InvalidTopic(_))));
}

#[tokio::test(start_paused = true)]
async fn cancellation_is_reported_not_swallowed() {
    let sources: Vec<Box<dyn SnippetSource>> = vec![Box::new(HangingSource)];
    let a = analyzer(sources, ScriptedClassifier::new(&[]));
    let cancel = tokio::time::sleep(Duration::from_secs(1));
    let res = a.analyze_cancellable("AI", cancel).await;
    assert_eq!(res, Err(PulseError::Cancelled));
}

#[tokio::test]
async fn classifier_panic_does_not_poison_later_requests() {
    let lane = ClassifierLane::spawn(Box::new(ScriptedClassifier::new(&[("Great", 0.9, 0.05)])));
    let poisoned: Vec<Box<dyn SnippetSource>> =
        vec![Box::new(StaticSource::new("s", &["POISON headline for the model"]))];
    let healthy: Vec<Box<dyn SnippetSource>> =
        vec![Box::new(StaticSource::new("s", &["Great healthy headline news"]))];
    let first = TopicAnalyzer::new(
        Arc::new(collector(poisoned)),
        SentimentScorer::new(lane.clone(), ScorerConfig::default()),
    );
    let second = TopicAnalyzer::new(
        Arc::new(collector(healthy)),
        SentimentScorer::new(lane, ScorerConfig::default()),
    );

    let r = first.analyze("health").await.unwrap();
    assert!(r.is_insufficient());

    let r = second.analyze("health").await.unwrap();
    assert_eq!(r.items_analyzed, 1);
    assert!((r.average_positive - 0.9).abs() < 1e-6);
}
