//! Tier- and context-conditioned recommendation sets.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{EmotionalAnalysis, StressTier};

/// Indexed by `StressTier::index`.
const BASE_SOLUTIONS: [&[&str]; 4] = [
    &[
        "Continue your excellent stress management practices",
        "Consider mentoring peers who might be struggling",
        "Maintain your current healthy routines",
    ],
    &[
        "Implement daily 10-minute mindfulness sessions",
        "Create a structured study schedule",
        "Join study groups for peer support",
    ],
    &[
        "Seek immediate counseling support",
        "Reduce academic workload if possible",
        "Practice daily stress relief techniques",
        "Connect with campus mental health services",
    ],
    &[
        "URGENT: Seek immediate professional mental health support",
        "Contact crisis helpline numbers provided",
        "Inform trusted family member or friend about your situation",
        "Consider temporary academic leave if recommended by counselor",
    ],
];

const IMMEDIATE_ACTIONS: [&[&str]; 4] = [
    &[
        "Celebrate your good mental health",
        "Consider supporting a friend who might be struggling",
        "Continue your healthy habits",
        "Practice maintenance mindfulness",
    ],
    &[
        "Take 5 deep breaths and practice mindfulness",
        "Go for a 10-minute walk outside",
        "Write down three things you're grateful for",
        "Reach out to a friend or family member",
    ],
    &[
        "Schedule appointment with counselor within 24-48 hours",
        "Practice 5-minute breathing exercise right now",
        "Drink water and ensure you've eaten today",
        "Limit social media and news consumption today",
    ],
    &[
        "Call emergency mental health helpline immediately",
        "Visit nearest hospital emergency room if having suicidal thoughts",
        "Contact trusted friend or family member to stay with you",
        "Avoid alcohol, drugs, or any impulsive decisions",
    ],
];

pub const GROUNDING_ACTION: &str =
    "Use grounding techniques: 5 things you can see, 4 you can hear, 3 you can touch";

const ANXIETY_SOLUTIONS: &[&str] = &[
    "Practice deep breathing exercises (4-7-8 technique)",
    "Try progressive muscle relaxation",
    "Limit caffeine intake which can worsen anxiety",
];

const DEPRESSION_SOLUTIONS: &[&str] = &[
    "Establish daily sunlight exposure routine",
    "Engage in physical activity, even light walking",
    "Reach out to support network regularly",
];

const OVERWHELM_SOLUTIONS: &[&str] = &[
    "Break large tasks into smaller, manageable steps",
    "Use time-blocking technique for better organization",
    "Practice saying \"no\" to non-essential commitments",
];

/// First matching category wins for each reported trigger.
const TRIGGER_SOLUTIONS: &[(&str, &str)] = &[
    (
        "Academic pressure",
        "Discuss academic expectations with professors or academic advisor",
    ),
    (
        "Financial problems",
        "Explore financial aid options and scholarship opportunities",
    ),
    (
        "Relationship issues",
        "Consider relationship counseling or focus on self-care during this transition",
    ),
    (
        "Family conflicts",
        "Practice setting healthy boundaries with family members",
    ),
];

const TRAUMA_SOLUTIONS: &[&str] = &[
    "Consider trauma-informed therapy (EMDR, CBT)",
    "Explore support groups for trauma survivors",
    "Practice grounding techniques during flashbacks or triggers",
    "Create a safety plan with trusted individuals",
];

const CONTEXT_SOLUTIONS: &[(&[&str], &str)] = &[
    (
        &["sleep", "tired"],
        "Prioritize sleep hygiene - aim for 7-9 hours nightly",
    ),
    (
        &["study", "exam"],
        "Implement active study techniques like spaced repetition",
    ),
    (
        &["friend", "social"],
        "Nurture existing friendships and consider joining social activities",
    ),
];

const CONTEXT_MIN_CHARS: usize = 20;

const LONG_TERM_BASE: &[&str] = &[
    "Develop a consistent daily routine",
    "Build a strong support network of friends and mentors",
    "Practice regular physical exercise (30+ minutes, 3x week)",
    "Learn and practice stress management techniques",
    "Maintain healthy sleep schedule (7-9 hours nightly)",
    "Consider regular therapy or counseling sessions",
    "Engage in hobbies and activities outside academics",
];

const LONG_TERM_COURSE: &[(&str, &str)] = &[
    (
        "Engineering",
        "Join technical communities and coding groups for peer support",
    ),
    (
        "Medical",
        "Practice self-care techniques to prevent burnout in healthcare career",
    ),
    ("MBA", "Develop emotional intelligence and leadership skills"),
];

const LONG_TERM_ELEVATED: &[&str] = &[
    "Regular psychiatric evaluation if recommended",
    "Medication management if prescribed",
    "Intensive therapy sessions (weekly or bi-weekly)",
    "Academic accommodations if needed",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub personalized_solutions: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub long_term_strategies: Vec<String>,
}

pub struct RecommendationComposer;

impl RecommendationComposer {
    pub fn compose(
        tier: StressTier,
        course: &str,
        emotional: &EmotionalAnalysis,
        context_text: &str,
    ) -> Recommendations {
        Recommendations {
            personalized_solutions: personalized_solutions(tier, emotional, context_text),
            immediate_actions: immediate_actions(tier, emotional.trauma_detected),
            long_term_strategies: long_term_strategies(tier, course),
        }
    }
}

/// Distinct coping suggestions, in first-seen order.
pub fn personalized_solutions(
    tier: StressTier,
    emotional: &EmotionalAnalysis,
    context_text: &str,
) -> Vec<String> {
    let mut candidates: Vec<&str> = BASE_SOLUTIONS[tier.index()].to_vec();

    match emotional.summary.primary_emotion.as_str() {
        "Anxious" | "Panicked" => candidates.extend_from_slice(ANXIETY_SOLUTIONS),
        "Depressed" | "Hopeless" => candidates.extend_from_slice(DEPRESSION_SOLUTIONS),
        "Overwhelmed" => candidates.extend_from_slice(OVERWHELM_SOLUTIONS),
        _ => {}
    }

    for trigger in &emotional.summary.trigger_events {
        if let Some((_, solution)) = TRIGGER_SOLUTIONS
            .iter()
            .find(|(category, _)| trigger.contains(category))
        {
            candidates.push(*solution);
        }
    }

    if emotional.trauma_detected {
        candidates.extend_from_slice(TRAUMA_SOLUTIONS);
    }

    if context_text.chars().count() > CONTEXT_MIN_CHARS {
        let lowered = context_text.to_lowercase();
        for (keywords, solution) in CONTEXT_SOLUTIONS {
            if keywords.iter().any(|k| lowered.contains(k)) {
                candidates.push(*solution);
            }
        }
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

pub fn immediate_actions(tier: StressTier, trauma_detected: bool) -> Vec<String> {
    let mut actions = Vec::with_capacity(5);
    if trauma_detected {
        actions.push(GROUNDING_ACTION.to_string());
    }
    actions.extend(IMMEDIATE_ACTIONS[tier.index()].iter().map(|s| s.to_string()));
    actions
}

pub fn long_term_strategies(tier: StressTier, course: &str) -> Vec<String> {
    let mut strategies: Vec<String> = LONG_TERM_BASE.iter().map(|s| s.to_string()).collect();

    if let Some((_, strategy)) = LONG_TERM_COURSE.iter().find(|(name, _)| *name == course) {
        strategies.push(strategy.to_string());
    }

    if tier.is_elevated() {
        strategies.extend(LONG_TERM_ELEVATED.iter().map(|s| s.to_string()));
    }

    strategies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionalStateAnalyzer;
    use proptest::prelude::*;

    fn analysis(emotion: &str, triggers: &[&str], context: &str) -> EmotionalAnalysis {
        EmotionalStateAnalyzer::analyze(emotion, triggers, context)
    }

    #[test]
    fn base_solutions_follow_tier() {
        let calm = analysis("Content", &[], "");
        let solutions = personalized_solutions(StressTier::Fabulous, &calm, "");
        assert_eq!(solutions.len(), 3);
        assert_eq!(solutions[0], "Continue your excellent stress management practices");

        let solutions = personalized_solutions(StressTier::Awful, &calm, "");
        assert_eq!(solutions.len(), 4);
        assert!(solutions[0].starts_with("URGENT"));
    }

    #[test]
    fn emotion_groups_add_targeted_solutions() {
        let panicked = analysis("Panicked", &[], "");
        let solutions = personalized_solutions(StressTier::Bad, &panicked, "");
        assert!(solutions
            .iter()
            .any(|s| s == "Practice deep breathing exercises (4-7-8 technique)"));

        let hopeless = analysis("Hopeless", &[], "");
        let solutions = personalized_solutions(StressTier::Bad, &hopeless, "");
        assert!(solutions.contains(&"Establish daily sunlight exposure routine".to_string()));

        let overwhelmed = analysis("Overwhelmed", &[], "");
        let solutions = personalized_solutions(StressTier::Good, &overwhelmed, "");
        assert_eq!(solutions.len(), 6);
    }

    #[test]
    fn triggers_match_by_substring() {
        let strained = analysis(
            "Stressed",
            &["Relationship issues/breakup", "Financial problems", "Exam failure"],
            "",
        );
        let solutions = personalized_solutions(StressTier::Good, &strained, "");
        assert!(solutions.iter().any(|s| s.starts_with("Consider relationship counseling")));
        assert!(solutions.iter().any(|s| s.starts_with("Explore financial aid")));
        assert_eq!(solutions.len(), 5);
    }

    #[test]
    fn trauma_adds_informed_care() {
        let trauma = analysis("Neutral", &[], "harassment");
        let solutions = personalized_solutions(StressTier::Good, &trauma, "harassment");
        assert_eq!(solutions.len(), 7);
        assert!(solutions.contains(&"Create a safety plan with trusted individuals".to_string()));
    }

    #[test]
    fn context_keywords_need_longer_text() {
        let calm = analysis("Content", &[], "");
        let short = personalized_solutions(StressTier::Good, &calm, "tired of exams");
        assert_eq!(short.len(), 3);

        let long = personalized_solutions(
            StressTier::Good,
            &calm,
            "I am always tired before an exam and skip my friends",
        );
        assert_eq!(long.len(), 6);
    }

    #[test]
    fn repeated_triggers_are_deduplicated() {
        let repeated = analysis("Stressed", &["Academic pressure", "Academic pressure"], "");
        let solutions = personalized_solutions(StressTier::Bad, &repeated, "");
        assert_eq!(solutions.len(), 5);
    }

    #[test]
    fn immediate_actions_prepend_grounding_on_trauma() {
        let plain = immediate_actions(StressTier::Bad, false);
        assert_eq!(plain.len(), 4);
        assert_eq!(plain[0], "Schedule appointment with counselor within 24-48 hours");

        let grounded = immediate_actions(StressTier::Fabulous, true);
        assert_eq!(grounded.len(), 5);
        assert_eq!(grounded[0], GROUNDING_ACTION);
    }

    #[test]
    fn long_term_strategies_by_course_and_tier() {
        assert_eq!(long_term_strategies(StressTier::Good, "Arts").len(), 7);
        let medical = long_term_strategies(StressTier::Good, "Medical");
        assert_eq!(medical.len(), 8);
        assert!(medical[7].contains("burnout"));
        assert_eq!(long_term_strategies(StressTier::Awful, "MBA").len(), 12);
        assert_eq!(long_term_strategies(StressTier::Bad, "Law").len(), 11);
    }

    proptest! {
        #[test]
        fn solutions_never_repeat(
            tier_index in 0usize..4,
            emotion in prop::sample::select(vec![
                "Anxious",
                "Panicked",
                "Depressed",
                "Overwhelmed",
                "Happy",
            ]),
            triggers in prop::collection::vec(
                prop::sample::select(vec![
                    "Academic pressure",
                    "Financial problems",
                    "Relationship issues/breakup",
                    "Family conflicts",
                    "Peer pressure",
                ]),
                0..6,
            ),
            context in "[a-z ]{0,60}",
        ) {
            let tier = StressTier::ALL[tier_index];
            let emotional = EmotionalStateAnalyzer::analyze(emotion, &triggers, &context);
            let solutions = personalized_solutions(tier, &emotional, &context);
            let distinct: HashSet<&String> = solutions.iter().collect();
            prop_assert_eq!(distinct.len(), solutions.len());
        }
    }
}
