// tests/common/mod.rs
// Mock sources and a scripted classifier shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use topic_pulse::config::ScorerConfig;
use topic_pulse::{
    Classifier, ClassifierLane, Collector, Polarity, SentimentScorer, Snippet, SnippetSource,
    TopicAnalyzer,
};

pub const TIMEOUT: Duration = Duration::from_secs(15);

pub fn snip(title: &str) -> Snippet {
    Snippet::new(title, format!("Coverage of: {title}"))
}

/// Returns the same items for every topic, optionally after a delay.
pub struct StaticSource {
    pub name: &'static str,
    pub items: Vec<Snippet>,
    pub delay: Duration,
}

impl StaticSource {
    pub fn new(name: &'static str, titles: &[&str]) -> Self {
        Self {
            name,
            items: titles.iter().map(|t| snip(t)).collect(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl SnippetSource for StaticSource {
    async fn fetch_snippets(&self, _topic: &str) -> Result<Vec<Snippet>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.items.clone())
    }
    fn name(&self) -> &'static str {
        self.name
    }
    fn max_items(&self) -> usize {
        100
    }
}

/// Items keyed by topic; unknown topics yield nothing.
pub struct TopicSource {
    pub by_topic: HashMap<String, Vec<Snippet>>,
}

impl TopicSource {
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        let by_topic = entries
            .iter()
            .map(|(topic, titles)| (topic.to_string(), titles.iter().map(|t| snip(t)).collect()))
            .collect();
        Self { by_topic }
    }
}

#[async_trait]
impl SnippetSource for TopicSource {
    async fn fetch_snippets(&self, topic: &str) -> Result<Vec<Snippet>> {
        Ok(self.by_topic.get(topic).cloned().unwrap_or_default())
    }
    fn name(&self) -> &'static str {
        "by-topic"
    }
    fn max_items(&self) -> usize {
        100
    }
}

pub struct FailingSource;

#[async_trait]
impl SnippetSource for FailingSource {
    async fn fetch_snippets(&self, _topic: &str) -> Result<Vec<Snippet>> {
        Err(anyhow!("connection reset by peer"))
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Never answers.
pub struct HangingSource;

#[async_trait]
impl SnippetSource for HangingSource {
    async fn fetch_snippets(&self, _topic: &str) -> Result<Vec<Snippet>> {
        futures::future::pending::<()>().await;
        Ok(Vec::new())
    }
    fn name(&self) -> &'static str {
        "hanging"
    }
}

pub struct PanickingSource;

#[async_trait]
impl SnippetSource for PanickingSource {
    async fn fetch_snippets(&self, _topic: &str) -> Result<Vec<Snippet>> {
        panic!("selector changed upstream");
    }
    fn name(&self) -> &'static str {
        "panicking"
    }
}

/// First rule whose keyword occurs in the text decides the polarity;
/// "MODEL-ERROR" makes the call fail, "POISON" panics. Counts calls.
pub struct ScriptedClassifier {
    pub rules: Vec<(&'static str, Polarity)>,
    pub fallback: Polarity,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedClassifier {
    pub fn new(rules: &[(&'static str, f32, f32)]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|(k, p, n)| (*k, Polarity::new(*p, *n)))
                .collect(),
            fallback: Polarity::new(0.2, 0.2),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&mut self, text: &str) -> Result<Polarity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("MODEL-ERROR") {
            return Err(anyhow!("inference failed"));
        }
        if text.contains("POISON") {
            panic!("tokenizer blew up on input");
        }
        Ok(self
            .rules
            .iter()
            .find(|(k, _)| text.contains(k))
            .map(|(_, p)| *p)
            .unwrap_or(self.fallback))
    }
    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn collector(sources: Vec<Box<dyn SnippetSource>>) -> Collector {
    Collector::with_sources(sources, TIMEOUT, 15)
}

pub fn analyzer(sources: Vec<Box<dyn SnippetSource>>, classifier: ScriptedClassifier) -> TopicAnalyzer {
    let scorer = SentimentScorer::new(
        ClassifierLane::spawn(Box::new(classifier)),
        ScorerConfig::default(),
    );
    TopicAnalyzer::new(Arc::new(collector(sources)), scorer)
}
