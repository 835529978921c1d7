//! Chat-style query parsing: "news about X", "how do people feel about X", ...

use once_cell::sync::Lazy;
use regex::Regex;

const TRIGGERS: [&str; 9] = [
    "how do people feel about",
    "how people feel about",
    "what people think about",
    "public opinion on",
    "sentiment of",
    "coverage about",
    "news about",
    "mood about",
    "analysis of",
];

/// Longest triggers first so "how do people feel about" wins over
/// "how people feel about" style overlaps.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    TRIGGERS
        .iter()
        .map(|t| Regex::new(&format!(r"(?i){}\s+(.+)", regex::escape(t))).expect("valid trigger regex"))
        .collect()
});

/// True when the text asks for a topic sentiment analysis.
pub fn is_topic_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    TRIGGERS.iter().any(|t| lower.contains(t))
}

/// Pull the topic out of a chat query, trimming trailing punctuation.
/// Returns `None` when no trigger phrase is followed by a topic.
pub fn extract_topic(text: &str) -> Option<String> {
    PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().trim_end_matches(['?', '!', '.']).trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// The topic from a chat query, or the whole trimmed text when it carries
/// no trigger phrase.
pub fn topic_or_text(text: &str) -> String {
    extract_topic(text).unwrap_or_else(|| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_trigger_phrases_case_insensitively() {
        assert!(is_topic_request("News About AI"));
        assert!(is_topic_request("what's the public opinion on nuclear power"));
        assert!(!is_topic_request("I feel great today"));
    }

    #[test]
    fn extracts_topic_after_trigger() {
        assert_eq!(extract_topic("news about AI").as_deref(), Some("AI"));
        assert_eq!(
            extract_topic("How do people feel about climate change?").as_deref(),
            Some("climate change")
        );
        assert_eq!(
            extract_topic("hey, what people think about electric cars!!").as_deref(),
            Some("electric cars")
        );
    }

    #[test]
    fn trigger_without_topic_is_none() {
        assert_eq!(extract_topic("news about ?"), None);
        assert_eq!(extract_topic("hello there"), None);
        assert_eq!(topic_or_text("  quantum computing "), "quantum computing");
    }
}
