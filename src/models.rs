use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::location::FacilityBundle;

/// Discrete stress severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressTier {
    Fabulous,
    Good,
    Bad,
    Awful,
}

impl StressTier {
    pub const ALL: [StressTier; 4] = [
        StressTier::Fabulous,
        StressTier::Good,
        StressTier::Bad,
        StressTier::Awful,
    ];

    /// Position of the tier in the base probability vector.
    pub fn index(self) -> usize {
        match self {
            StressTier::Fabulous => 0,
            StressTier::Good => 1,
            StressTier::Bad => 2,
            StressTier::Awful => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StressTier::Fabulous => "Fabulous",
            StressTier::Good => "Good",
            StressTier::Bad => "Bad",
            StressTier::Awful => "Awful",
        }
    }

    /// Bad and Awful unlock the intensified recommendation sets.
    pub fn is_elevated(self) -> bool {
        matches!(self, StressTier::Bad | StressTier::Awful)
    }
}

impl fmt::Display for StressTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StressTier {
    type Err = AdvisorError;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        StressTier::ALL
            .into_iter()
            .find(|tier| tier.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                AdvisorError::invalid_argument(format!(
                    "unknown stress tier '{trimmed}', expected one of Fabulous, Good, Bad, Awful"
                ))
            })
    }
}

/// Self-reported academic and lifestyle profile.
///
/// Informational for the scoring core; the baseline predictor is the only
/// consumer that reads the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub tenth_mark: f64,
    pub twelfth_mark: f64,
    pub college_mark: f64,
    pub study_hours: f64,
    pub social_media_hours: f64,
    pub travel_minutes: f64,
    pub career_willingness: f64,
    pub financial_status: StressTier,
}

impl UserProfile {
    pub fn academic_average(&self) -> f64 {
        (self.tenth_mark + self.twelfth_mark + self.college_mark) / 3.0
    }

    pub fn validate(&self) -> Result<()> {
        check_range("tenth_mark", self.tenth_mark, 0.0, 100.0)?;
        check_range("twelfth_mark", self.twelfth_mark, 0.0, 100.0)?;
        check_range("college_mark", self.college_mark, 0.0, 100.0)?;
        check_range("study_hours", self.study_hours, 0.0, 24.0)?;
        check_range("social_media_hours", self.social_media_hours, 0.0, 24.0)?;
        check_range("travel_minutes", self.travel_minutes, 0.0, f64::MAX)?;
        check_range("career_willingness", self.career_willingness, 0.0, 100.0)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(AdvisorError::invalid_argument(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Everything the presentation layer collects for one assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub base_label: StressTier,
    pub base_probabilities: Vec<f64>,
    pub course: String,
    pub emotion: String,
    pub trigger_events: Vec<String>,
    pub context_text: String,
    pub region: String,
    pub locality: String,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// Higher sentiment scores are more negative.
    pub fn from_score(score: f64) -> Self {
        if score > 0.6 {
            SentimentLabel::Negative
        } else if score > 0.4 {
            SentimentLabel::Neutral
        } else {
            SentimentLabel::Positive
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub primary_emotion: String,
    pub trigger_events: Vec<String>,
    pub trauma_indicators: bool,
    pub context_sentiment: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionalAnalysis {
    pub emotion_score: f64,
    pub trigger_score: f64,
    pub trauma_detected: bool,
    pub trauma_score: f64,
    pub sentiment_score: f64,
    pub summary: AnalysisSummary,
}

/// Fixed weighted contributions behind the enhanced score, kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base_model_contribution: f64,
    pub course_factor_contribution: f64,
    pub emotional_state_contribution: f64,
    pub trigger_events_contribution: f64,
    pub base_stress_score: f64,
    pub trauma_bonus: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositeResult {
    pub original_prediction: StressTier,
    pub enhanced_tier: StressTier,
    pub breakdown: ScoreBreakdown,
    pub emotional_analysis: EmotionalAnalysis,
    pub personalized_solutions: Vec<String>,
    pub course_advice: Vec<String>,
    pub location_facilities: FacilityBundle,
    pub immediate_actions: Vec<String>,
    pub long_term_strategies: Vec<String>,
}

#[cfg(test)]
pub(crate) fn sample_profile() -> UserProfile {
    UserProfile {
        tenth_mark: 82.0,
        twelfth_mark: 76.0,
        college_mark: 70.0,
        study_hours: 6.0,
        social_media_hours: 3.0,
        travel_minutes: 30.0,
        career_willingness: 50.0,
        financial_status: StressTier::Good,
    }
}
