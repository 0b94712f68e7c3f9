use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::baseline::TierGuidance;
use crate::location::Facility;
use crate::models::{AssessmentRequest, CompositeResult, StressTier};

pub fn build_report(
    request: &AssessmentRequest,
    result: &CompositeResult,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    let guidance = TierGuidance::for_tier(result.enhanced_tier);
    let breakdown = &result.breakdown;
    let emotional = &result.emotional_analysis;

    let _ = writeln!(output, "# Student Stress Assessment");
    let _ = writeln!(
        output,
        "Generated {} for a {} student in {}, {}",
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        request.course,
        request.locality,
        request.region
    );
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "**Stress level: {}** (base prediction {}): {}",
        result.enhanced_tier, result.original_prediction, guidance.status
    );
    let _ = writeln!(
        output,
        "Academic average {:.1}% | Career willingness {:.0}% | Social media {:.1}h/day | Financial status {}",
        request.profile.academic_average(),
        request.profile.career_willingness,
        request.profile.social_media_hours,
        request.profile.financial_status
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Score Breakdown");
    let _ = writeln!(
        output,
        "- Base model ({:.0}%): stress score {:.3}",
        breakdown.base_model_contribution * 100.0,
        breakdown.base_stress_score
    );
    let _ = writeln!(
        output,
        "- Course factor ({:.0}%)",
        breakdown.course_factor_contribution * 100.0
    );
    let _ = writeln!(
        output,
        "- Emotional state ({:.0}%): {:.2}",
        breakdown.emotional_state_contribution * 100.0,
        emotional.emotion_score
    );
    let _ = writeln!(
        output,
        "- Trigger events ({:.0}%): {:.2}",
        breakdown.trigger_events_contribution * 100.0,
        emotional.trigger_score
    );
    if breakdown.trauma_bonus > 0.0 {
        let _ = writeln!(output, "- Trauma indicator bonus: +{:.2}", breakdown.trauma_bonus);
    }
    let _ = writeln!(output, "- Final score: {:.3}", breakdown.final_score);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Emotional Analysis");
    let _ = writeln!(output, "- Primary emotion: {}", emotional.summary.primary_emotion);
    if emotional.summary.trigger_events.is_empty() {
        let _ = writeln!(output, "- Trigger events: none reported");
    } else {
        let _ = writeln!(
            output,
            "- Trigger events: {}",
            emotional.summary.trigger_events.join(", ")
        );
    }
    let _ = writeln!(
        output,
        "- Context sentiment: {} ({:.2})",
        emotional.summary.context_sentiment, emotional.sentiment_score
    );
    let _ = writeln!(
        output,
        "- Trauma indicators: {}",
        if emotional.trauma_detected { "detected" } else { "none" }
    );

    write_list(&mut output, "Immediate Actions", &result.immediate_actions);
    write_list(&mut output, "Personalized Solutions", &result.personalized_solutions);
    write_list(&mut output, "Course-Specific Advice", &result.course_advice);
    write_list(&mut output, "Long-Term Strategies", &result.long_term_strategies);
    write_list(&mut output, "Identified Risks", guidance.risks);

    let facilities = &result.location_facilities;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Nearby Support");
    if let Some(note) = &facilities.fallback_note {
        let _ = writeln!(output, "_{note}_");
    }
    write_facilities(&mut output, "Hospitals", &facilities.hospitals);
    write_facilities(&mut output, "Counseling Centers", &facilities.counseling_centers);
    write_facilities(&mut output, "Support Groups", &facilities.support_groups);

    let _ = writeln!(output);
    let _ = writeln!(output, "### Emergency Helplines");
    for contact in &facilities.emergency_numbers {
        let _ = writeln!(
            output,
            "- {}: {} ({})",
            contact.name, contact.number, contact.description
        );
    }

    if result.enhanced_tier == StressTier::Awful {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "> **Crisis disclaimer:** this is an automated assessment. If you are having thoughts of self-harm or suicide, seek immediate professional help or call emergency services. Help is available 24/7."
        );
    }

    output
}

fn write_list<S: AsRef<str>>(output: &mut String, title: &str, items: &[S]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");
    if items.is_empty() {
        let _ = writeln!(output, "No items for this assessment.");
        return;
    }
    for item in items {
        let _ = writeln!(output, "- {}", item.as_ref());
    }
}

fn write_facilities(output: &mut String, title: &str, facilities: &[Facility]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "### {title}");
    if facilities.is_empty() {
        let _ = writeln!(output, "No listings available.");
        return;
    }
    for facility in facilities {
        let mut line = format!("- {}", facility.name);
        if let Some(address) = &facility.address {
            let _ = write!(line, ", {address}");
        }
        if let Some(contact) = &facility.contact {
            let _ = write!(line, " ({contact})");
        }
        if !facility.services.is_empty() {
            let _ = write!(line, " - {}", facility.services.join(", "));
        }
        if let Some(cost) = &facility.cost {
            let _ = write!(line, " [{cost}]");
        }
        if facility.emergency == Some(true) {
            line.push_str(" [24/7 emergency]");
        }
        let _ = writeln!(output, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseProfile, CourseTable};
    use crate::engine::RecommendationEngine;
    use crate::location::{sample_directory, RegionCapitals};
    use crate::models::sample_profile;
    use crate::reference::ReferenceData;
    use chrono::TimeZone;

    fn assess(
        probabilities: Vec<f64>,
        context: &str,
        locality: &str,
    ) -> (AssessmentRequest, CompositeResult) {
        let mut courses = CourseTable::new();
        courses.insert(
            "Medical".to_string(),
            CourseProfile {
                base_stress_factor: 0.8,
                coping_strategies: Some(vec!["Rotate study partners".to_string()]),
            },
        );
        let engine = RecommendationEngine::new(ReferenceData {
            courses,
            facilities: sample_directory(),
            capitals: RegionCapitals::default(),
        });
        let request = AssessmentRequest {
            base_label: StressTier::Bad,
            base_probabilities: probabilities,
            course: "Medical".to_string(),
            emotion: "Depressed".to_string(),
            trigger_events: vec!["Exam failure".to_string()],
            context_text: context.to_string(),
            region: "Karnataka".to_string(),
            locality: locality.to_string(),
            profile: sample_profile(),
        };
        let result = engine.assess(&request).unwrap();
        (request, result)
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn report_includes_headline_and_sections() {
        let (request, result) = assess(vec![0.1, 0.2, 0.6, 0.1], "", "Bangalore");
        let report = build_report(&request, &result, generated_at());

        assert!(report.starts_with("# Student Stress Assessment"));
        assert!(report.contains(
            "Generated 2026-03-01 09:30 UTC for a Medical student in Bangalore, Karnataka"
        ));
        assert!(report.contains("**Stress level: Bad** (base prediction Bad)"));
        assert!(report.contains("## Long-Term Strategies"));
        assert!(report.contains("- NIMHANS"));
        assert!(report.contains("Kiran Mental Health Helpline"));
        assert!(!report.contains("Crisis disclaimer"));
    }

    #[test]
    fn report_shows_fallback_and_crisis_notes() {
        let (request, result) = assess(vec![0.0, 0.0, 0.1, 0.9], "a violent assault", "Hubli");
        let report = build_report(&request, &result, generated_at());

        assert!(report.contains("Trauma indicator bonus"));
        assert!(report.contains("(state capital) as Hubli information not available"));
        assert!(report.contains("Crisis disclaimer"));
    }
}
