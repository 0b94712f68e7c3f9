//! Rule-based base prediction used when no classifier output is supplied,
//! plus the per-tier guidance shown next to it.

use serde::Serialize;

use crate::models::{StressTier, UserProfile};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselinePrediction {
    pub label: StressTier,
    pub probabilities: [f64; 4],
    pub risk_points: u32,
}

impl BaselinePrediction {
    pub fn confidence(&self) -> f64 {
        self.probabilities.iter().copied().fold(0.0, f64::max)
    }
}

pub fn predict_baseline(profile: &UserProfile) -> BaselinePrediction {
    let risk_points = academic_points(profile.academic_average())
        + career_points(profile.career_willingness)
        + social_media_points(profile.social_media_hours)
        + financial_points(profile.financial_status);

    let (label, probabilities) = match risk_points {
        6.. => (StressTier::Awful, [0.1, 0.1, 0.2, 0.6]),
        4..=5 => (StressTier::Bad, [0.1, 0.2, 0.6, 0.1]),
        2..=3 => (StressTier::Good, [0.2, 0.6, 0.1, 0.1]),
        _ => (StressTier::Fabulous, [0.6, 0.3, 0.1, 0.0]),
    };

    BaselinePrediction {
        label,
        probabilities,
        risk_points,
    }
}

fn academic_points(average: f64) -> u32 {
    if average < 50.0 {
        3
    } else if average < 70.0 {
        1
    } else {
        0
    }
}

fn career_points(willingness: f64) -> u32 {
    if willingness < 30.0 {
        2
    } else if willingness < 60.0 {
        1
    } else {
        0
    }
}

fn social_media_points(hours: f64) -> u32 {
    if hours > 8.0 {
        2
    } else if hours > 5.0 {
        1
    } else {
        0
    }
}

fn financial_points(status: StressTier) -> u32 {
    match status {
        StressTier::Awful => 2,
        StressTier::Bad => 1,
        StressTier::Good | StressTier::Fabulous => 0,
    }
}

/// Headline, likely risks, and recommended actions for a tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierGuidance {
    pub status: &'static str,
    pub risks: &'static [&'static str],
    pub actions: &'static [&'static str],
}

impl TierGuidance {
    pub fn for_tier(tier: StressTier) -> Self {
        match tier {
            StressTier::Fabulous => TierGuidance {
                status: "Excellent Mental Health!",
                risks: &[
                    "Minimal psychological risk",
                    "Strong emotional resilience",
                    "Healthy coping mechanisms in place",
                    "Good work-life balance",
                ],
                actions: &[
                    "Continue current stress management practices",
                    "Maintain regular physical activity",
                    "Keep healthy sleep schedule (7-9 hours)",
                    "Nurture social connections",
                    "Consider mentoring others with stress management",
                ],
            },
            StressTier::Good => TierGuidance {
                status: "Good Mental Health with Minor Concerns",
                risks: &[
                    "Mild anxiety during exams",
                    "Occasional sleep disruption",
                    "Risk of perfectionism creating pressure",
                    "Tendency to compare with peers",
                ],
                actions: &[
                    "Practice 15 minutes daily meditation",
                    "Start a stress journal",
                    "Exercise 30 minutes daily",
                    "Establish consistent sleep routine",
                    "Limit social media before bed",
                    "Talk to counselor if overwhelmed",
                ],
            },
            StressTier::Bad => TierGuidance {
                status: "Elevated Stress - Action Needed",
                risks: &[
                    "Risk of anxiety disorders",
                    "Potential depression symptoms",
                    "Academic burnout possible",
                    "Physical health issues (headaches, fatigue)",
                    "Social withdrawal tendencies",
                    "Concentration and memory problems",
                ],
                actions: &[
                    "Seek professional counseling - don't wait",
                    "Prioritize sleep - 7-9 hours",
                    "Daily stress relief - meditation or yoga",
                    "Physical activity - 20+ minutes daily",
                    "Reach out - talk to friends, family, counselors",
                    "Digital detox - reduce screen time",
                    "Academic support - tutoring, study groups",
                    "Campus counseling center - free services available",
                ],
            },
            StressTier::Awful => TierGuidance {
                status: "CRITICAL - Immediate Help Required",
                risks: &[
                    "SEVERE: Major depression risk",
                    "SEVERE: Anxiety and panic disorders",
                    "SEVERE: Suicidal ideation possible",
                    "SEVERE: Complete academic failure",
                    "SEVERE: Physical health crisis",
                    "SEVERE: Social isolation",
                    "SEVERE: Substance abuse risk",
                ],
                actions: &[
                    "EMERGENCY: Call a crisis hotline immediately",
                    "Visit the emergency room if having suicidal thoughts",
                    "Don't be alone - stay with a trusted person",
                    "Avoid alcohol and drugs",
                    "See a psychiatrist for medication evaluation",
                    "Start intensive therapy immediately",
                    "Campus health services - seek help today",
                ],
            },
        }
    }
}
