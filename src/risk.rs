use crate::error::{AdvisorError, Result};
use crate::models::{EmotionalAnalysis, ScoreBreakdown, StressTier};

pub const BASE_MODEL_WEIGHT: f64 = 0.70;
pub const COURSE_WEIGHT: f64 = 0.10;
pub const EMOTION_WEIGHT: f64 = 0.10;
pub const TRIGGER_WEIGHT: f64 = 0.10;
pub const TRAUMA_BONUS: f64 = 0.1;

const PROBABILITY_TOLERANCE: f64 = 1e-3;

pub struct StressScoreAggregator;

impl StressScoreAggregator {
    pub fn aggregate(
        base_distribution: &[f64],
        course_factor: f64,
        emotional: &EmotionalAnalysis,
    ) -> Result<(StressTier, ScoreBreakdown)> {
        let base_stress_score = base_stress_score(base_distribution)?;
        let weighted = weighted_score(
            base_stress_score,
            course_factor,
            emotional.emotion_score,
            emotional.trigger_score,
        );
        let final_score = apply_trauma_bonus(weighted, emotional.trauma_detected);

        let breakdown = ScoreBreakdown {
            base_model_contribution: BASE_MODEL_WEIGHT,
            course_factor_contribution: COURSE_WEIGHT,
            emotional_state_contribution: EMOTION_WEIGHT,
            trigger_events_contribution: TRIGGER_WEIGHT,
            base_stress_score,
            trauma_bonus: (final_score - weighted).max(0.0),
            final_score,
        };

        Ok((tier_for_score(final_score), breakdown))
    }
}

/// Expected tier index of the base distribution, scaled to [0, 1].
pub fn base_stress_score(probabilities: &[f64]) -> Result<f64> {
    if probabilities.len() != StressTier::ALL.len() {
        return Err(AdvisorError::invalid_argument(format!(
            "base probability vector must have 4 entries, got {}",
            probabilities.len()
        )));
    }
    if let Some(bad) = probabilities
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
    {
        return Err(AdvisorError::invalid_argument(format!(
            "base probabilities must lie in [0, 1], got {bad}"
        )));
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(AdvisorError::invalid_argument(format!(
            "base probabilities must sum to 1, got {total:.4}"
        )));
    }

    let expected: f64 = probabilities
        .iter()
        .enumerate()
        .map(|(index, p)| index as f64 * p)
        .sum();
    Ok(expected / (probabilities.len() - 1) as f64)
}

pub fn weighted_score(
    base_stress_score: f64,
    course_factor: f64,
    emotion_score: f64,
    trigger_score: f64,
) -> f64 {
    let score = BASE_MODEL_WEIGHT * base_stress_score
        + COURSE_WEIGHT * course_factor
        + EMOTION_WEIGHT * emotion_score
        + TRIGGER_WEIGHT * trigger_score;
    score.clamp(0.0, 1.0)
}

pub fn apply_trauma_bonus(score: f64, trauma_detected: bool) -> f64 {
    if trauma_detected {
        (score + TRAUMA_BONUS).min(1.0)
    } else {
        score
    }
}

/// Bands are inclusive at their lower bound.
pub fn tier_for_score(score: f64) -> StressTier {
    if score >= 0.8 {
        StressTier::Awful
    } else if score >= 0.6 {
        StressTier::Bad
    } else if score >= 0.4 {
        StressTier::Good
    } else {
        StressTier::Fabulous
    }
}
