//! Qualitative labels for presentation. Derived on demand from a
//! `TopicResult`, never stored.

use serde::Serialize;

use crate::analyzer::TopicResult;
use crate::classify::Polarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    VeryPositive,
    GenerallyPositive,
    SlightlyPositive,
    VeryNegative,
    GenerallyNegative,
    SlightlyNegative,
    MixedLeaningPositive,
    MixedLeaningNegative,
    NeutralMixed,
}

impl Mood {
    /// Thresholds are checked in order; the positive side wins ties between
    /// rules (e.g. pos 0.65 / neg 0.65 is "Generally Positive").
    pub fn from_scores(pos: f32, neg: f32) -> Self {
        if pos > 0.7 && neg < 0.3 {
            Mood::VeryPositive
        } else if pos > 0.6 {
            Mood::GenerallyPositive
        } else if pos > 0.5 {
            Mood::SlightlyPositive
        } else if neg > 0.7 && pos < 0.3 {
            Mood::VeryNegative
        } else if neg > 0.6 {
            Mood::GenerallyNegative
        } else if neg > 0.5 {
            Mood::SlightlyNegative
        } else if pos > neg {
            Mood::MixedLeaningPositive
        } else if neg > pos {
            Mood::MixedLeaningNegative
        } else {
            Mood::NeutralMixed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::VeryPositive => "Very Positive",
            Mood::GenerallyPositive => "Generally Positive",
            Mood::SlightlyPositive => "Slightly Positive",
            Mood::VeryNegative => "Very Negative",
            Mood::GenerallyNegative => "Generally Negative",
            Mood::SlightlyNegative => "Slightly Negative",
            Mood::MixedLeaningPositive => "Mixed but Leaning Positive",
            Mood::MixedLeaningNegative => "Mixed but Leaning Negative",
            Mood::NeutralMixed => "Neutral/Mixed",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::VeryPositive => "😊",
            Mood::GenerallyPositive => "🙂",
            Mood::VeryNegative => "😠",
            Mood::GenerallyNegative => "😟",
            Mood::MixedLeaningPositive | Mood::MixedLeaningNegative => "🤔",
            Mood::SlightlyPositive | Mood::SlightlyNegative | Mood::NeutralMixed => "😐",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(c: f32) -> Self {
        if c > 0.7 {
            ConfidenceBand::High
        } else if c > 0.5 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Moderate => "moderate",
            ConfidenceBand::Low => "low",
        }
    }
}

/// One-sentence reading of the overall discourse.
pub fn insight(result: &TopicResult) -> &'static str {
    let pos = result.average_positive;
    let neg = result.average_negative;
    if pos > 0.7 {
        "Public discourse is overwhelmingly positive! This topic is receiving favorable coverage."
    } else if pos > 0.6 {
        "Generally positive sentiment. The topic is well-received in public discussions."
    } else if neg > 0.7 {
        "Strong negative sentiment dominates. There are significant concerns being raised."
    } else if neg > 0.6 {
        "Generally negative coverage. Critical viewpoints are common in discussions."
    } else if pos > neg {
        "Slightly positive overall, with mixed opinions."
    } else if neg > pos {
        "Slightly negative overall, with mixed opinions."
    } else {
        "Very mixed opinions with no clear consensus emerging."
    }
}

/// Conversational answer to a personal message, picked from its polarity.
/// Rules are checked in order; ranges are inclusive.
pub fn reply_for(p: Polarity) -> &'static str {
    let (pos, neg) = (p.positive, p.negative);
    let mid = |x: f32| (0.4..=0.6).contains(&x);
    if pos > 0.8 && neg < 0.2 {
        "That's wonderful! 😄"
    } else if pos > 0.6 && neg < 0.4 {
        "Glad you're feeling good! 🙂"
    } else if mid(pos) && mid(neg) {
        "I'm here for you 😐"
    } else if pos < 0.4 && neg > 0.6 {
        "I'm sorry you're feeling this way 😟"
    } else if pos < 0.2 && neg > 0.8 {
        "Take a deep breath 😠"
    } else if pos < 0.3 && neg < 0.3 {
        "Would you like to talk more? 😕"
    } else if pos > 0.7 && neg > 0.3 {
        "Let's work through this together 😬"
    } else if pos < 0.3 && neg > 0.7 {
        "I'm here with you 😞"
    } else {
        "Tell me more about how you're feeling"
    }
}

/// Personal-message result as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodReply {
    pub positive: f32,
    pub negative: f32,
    pub reply: &'static str,
}

impl From<Polarity> for MoodReply {
    fn from(p: Polarity) -> Self {
        Self {
            positive: p.positive,
            negative: p.negative,
            reply: reply_for(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_thresholds() {
        assert_eq!(Mood::from_scores(0.8, 0.1), Mood::VeryPositive);
        assert_eq!(Mood::from_scores(0.8, 0.35), Mood::GenerallyPositive);
        assert_eq!(Mood::from_scores(0.55, 0.2), Mood::SlightlyPositive);
        assert_eq!(Mood::from_scores(0.1, 0.8), Mood::VeryNegative);
        assert_eq!(Mood::from_scores(0.4, 0.65), Mood::GenerallyNegative);
        assert_eq!(Mood::from_scores(0.3, 0.52), Mood::SlightlyNegative);
        assert_eq!(Mood::from_scores(0.45, 0.425), Mood::MixedLeaningPositive);
        assert_eq!(Mood::from_scores(0.2, 0.4), Mood::MixedLeaningNegative);
        assert_eq!(Mood::from_scores(0.4, 0.4), Mood::NeutralMixed);
        assert_eq!(Mood::NeutralMixed.label(), "Neutral/Mixed");
    }

    #[test]
    fn confidence_bands_are_exclusive_at_the_edges() {
        assert_eq!(ConfidenceBand::from_confidence(0.71), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.7), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_confidence(0.5), ConfidenceBand::Low);
    }

    #[test]
    fn insight_follows_averages() {
        let mut r = TopicResult::insufficient("x");
        r.average_positive = 0.75;
        r.average_negative = 0.1;
        assert!(insight(&r).starts_with("Public discourse is overwhelmingly positive"));
        r.average_positive = 0.3;
        r.average_negative = 0.3;
        assert!(insight(&r).starts_with("Very mixed"));
    }

    #[test]
    fn personal_reply_ladder() {
        let r = |p, n| reply_for(Polarity::new(p, n));
        assert_eq!(r(0.9, 0.1), "That's wonderful! 😄");
        assert_eq!(r(0.7, 0.3), "Glad you're feeling good! 🙂");
        assert_eq!(r(0.5, 0.5), "I'm here for you 😐");
        assert_eq!(r(0.4, 0.6), "I'm here for you 😐");
        assert_eq!(r(0.3, 0.7), "I'm sorry you're feeling this way 😟");
        // earlier rule wins over the stronger-sounding one
        assert_eq!(r(0.1, 0.9), "I'm sorry you're feeling this way 😟");
        assert_eq!(r(0.1, 0.1), "Would you like to talk more? 😕");
        assert_eq!(r(0.0, 0.0), "Would you like to talk more? 😕");
        assert_eq!(r(0.8, 0.5), "Let's work through this together 😬");
        assert_eq!(r(0.65, 0.45), "Tell me more about how you're feeling");
    }

    #[test]
    fn mood_reply_carries_scores() {
        let m = MoodReply::from(Polarity::new(0.85, 0.1));
        assert_eq!(m.reply, "That's wonderful! 😄");
        assert_eq!(m.positive, 0.85);
    }
}
