//! Caller-visible failures. "Not enough data" is *not* an error here; it is
//! reported as the insufficient `TopicResult` or an omitted category.

use thiserror::Error;

/// Longest topic string accepted by `TopicAnalyzer::analyze`.
pub const MAX_TOPIC_CHARS: usize = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PulseError {
    #[error("invalid topic: {0}")]
    InvalidTopic(String),
    #[error("request cancelled")]
    Cancelled,
    #[error("configuration error: {0}")]
    Config(String),
}

pub type PulseResult<T> = std::result::Result<T, PulseError>;

/// Trim and validate a caller-supplied topic.
pub fn validate_topic(topic: &str) -> PulseResult<String> {
    let t = topic.trim();
    if t.is_empty() {
        return Err(PulseError::InvalidTopic("topic is empty".into()));
    }
    if t.chars().count() > MAX_TOPIC_CHARS {
        return Err(PulseError::InvalidTopic(format!(
            "topic longer than {MAX_TOPIC_CHARS} characters"
        )));
    }
    Ok(t.to_string())
}
