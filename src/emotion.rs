//! Emotion, trigger, and free-text heuristics feeding the stress score.

use crate::models::{AnalysisSummary, EmotionalAnalysis, SentimentLabel};

pub const UNKNOWN_WEIGHT: f64 = 0.5;
pub const NO_TRIGGER_SCORE: f64 = 0.3;
pub const TRAUMA_SCORE: f64 = 0.9;
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

pub const EMOTION_WEIGHTS: &[(&str, f64)] = &[
    ("Very Happy", 0.1),
    ("Happy", 0.2),
    ("Content", 0.3),
    ("Neutral", 0.4),
    ("Slightly Stressed", 0.5),
    ("Stressed", 0.7),
    ("Very Stressed", 0.8),
    ("Anxious", 0.8),
    ("Depressed", 0.9),
    ("Overwhelmed", 0.9),
    ("Panicked", 1.0),
    ("Hopeless", 1.0),
];

pub const TRIGGER_WEIGHTS: &[(&str, f64)] = &[
    ("Academic pressure", 0.7),
    ("Parent scolding/disappointment", 0.6),
    ("Relationship issues/breakup", 0.8),
    ("Financial problems", 0.8),
    ("Family conflicts", 0.7),
    ("Health issues", 0.9),
    ("Career uncertainty", 0.7),
    ("Social isolation", 0.6),
    ("Exam failure", 0.8),
    ("Peer pressure", 0.5),
    ("Loss of loved one", 1.0),
    ("Trauma/abuse", 1.0),
    ("None/No specific trigger", 0.2),
];

const TRAUMA_KEYWORDS: &[&str] = &[
    "childhood trauma",
    "abuse",
    "bullying",
    "violence",
    "assault",
    "neglect",
    "divorce",
    "death",
    "accident",
    "harassment",
    "discrimination",
    "betrayal",
    "abandonment",
    "rejection",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "angry",
    "frustrated",
    "terrible",
    "awful",
    "hate",
    "depressed",
    "hopeless",
    "worthless",
    "failure",
    "disappointed",
    "stressed",
    "overwhelmed",
    "exhausted",
    "tired",
    "worried",
    "scared",
];

const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "good",
    "great",
    "excellent",
    "wonderful",
    "amazing",
    "love",
    "excited",
    "confident",
    "optimistic",
    "hopeful",
    "peaceful",
];

pub struct EmotionalStateAnalyzer;

impl EmotionalStateAnalyzer {
    pub fn analyze<S: AsRef<str>>(
        emotion: &str,
        triggers: &[S],
        context_text: &str,
    ) -> EmotionalAnalysis {
        let emotion_score = emotion_weight(emotion);
        let trigger_score = trigger_score(triggers);
        let trauma_detected = detect_trauma(context_text);
        let sentiment_score = sentiment_score(context_text);

        EmotionalAnalysis {
            emotion_score,
            trigger_score,
            trauma_detected,
            trauma_score: if trauma_detected { TRAUMA_SCORE } else { 0.0 },
            sentiment_score,
            summary: AnalysisSummary {
                primary_emotion: emotion.to_string(),
                trigger_events: triggers.iter().map(|t| t.as_ref().to_string()).collect(),
                trauma_indicators: trauma_detected,
                context_sentiment: SentimentLabel::from_score(sentiment_score),
            },
        }
    }
}

fn lookup(table: &[(&str, f64)], key: &str) -> f64 {
    table
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, weight)| *weight)
        .unwrap_or(UNKNOWN_WEIGHT)
}

pub fn emotion_weight(emotion: &str) -> f64 {
    lookup(EMOTION_WEIGHTS, emotion)
}

pub fn trigger_weight(trigger: &str) -> f64 {
    lookup(TRIGGER_WEIGHTS, trigger)
}

/// Mean trigger severity, or a fixed low default when nothing was reported.
pub fn trigger_score<S: AsRef<str>>(triggers: &[S]) -> f64 {
    if triggers.is_empty() {
        return NO_TRIGGER_SCORE;
    }
    let total: f64 = triggers.iter().map(|t| trigger_weight(t.as_ref())).sum();
    total / triggers.len() as f64
}

pub fn detect_trauma(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    TRAUMA_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Keyword-ratio sentiment in [0, 1], higher meaning more negative.
///
/// Each list word counts once when it appears anywhere in the text. The
/// `0.5 * words` term keeps the result near 0.5 for any text of realistic
/// length; tier outcomes depend on that range.
pub fn sentiment_score(text: &str) -> f64 {
    if text.is_empty() {
        return NEUTRAL_SENTIMENT;
    }
    let total_words = text.split_whitespace().count();
    if total_words == 0 {
        return NEUTRAL_SENTIMENT;
    }

    let lowered = text.to_lowercase();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lowered.contains(*w)).count() as f64;
    let positive = POSITIVE_WORDS.iter().filter(|w| lowered.contains(*w)).count() as f64;
    let words = total_words as f64;

    ((negative - positive + words * 0.5) / words).clamp(0.0, 1.0)
}
