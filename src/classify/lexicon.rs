//! Keyword fallback classifier: lower-fidelity, no model required.

use anyhow::Result;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{Classifier, Polarity};

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Summed lexicon weight at which a one-sided text reaches full confidence.
const FULL_EVIDENCE: f32 = 4.0;

#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Returns (positive weight, negative weight) summed over the text.
    /// A negator in the previous 1..=3 tokens flips a word's polarity.
    pub fn weigh(&self, text: &str) -> (f32, f32) {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut pos = 0.0f32;
        let mut neg = 0.0f32;

        for i in 0..tokens.len() {
            let base = *LEXICON.get(tokens[i].as_str()).unwrap_or(&0);
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            let adj = if negated { -base } else { base };
            if adj > 0 {
                pos += adj as f32;
            } else {
                neg += (-adj) as f32;
            }
        }
        (pos, neg)
    }

    /// No sentiment words → (0, 0), which the confidence gate rejects.
    /// Otherwise the split between the two sides is pulled toward 0.5 when
    /// there is little evidence.
    pub fn polarity(&self, text: &str) -> Polarity {
        let (pos, neg) = self.weigh(text);
        let total = pos + neg;
        if total <= 0.0 {
            return Polarity::default();
        }
        let evidence = (total / FULL_EVIDENCE).min(1.0);
        let share_pos = pos / total;
        let positive = 0.5 + (share_pos - 0.5) * evidence;
        Polarity::new(positive, 1.0 - positive)
    }
}

#[async_trait::async_trait]
impl Classifier for LexiconClassifier {
    async fn classify(&mut self, text: &str) -> Result<Polarity> {
        Ok(self.polarity(text))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

/// Alphanumeric (plus apostrophe) tokens, lower-case.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "without"
            | "hardly"
    )
}
