use tracing::debug;

use crate::course::CourseProfileLookup;
use crate::emotion::EmotionalStateAnalyzer;
use crate::error::Result;
use crate::location::LocationFacilityResolver;
use crate::models::{AssessmentRequest, CompositeResult};
use crate::recommend::RecommendationComposer;
use crate::reference::ReferenceData;
use crate::risk::StressScoreAggregator;

/// Single entry point for an assessment. Holds only read-only reference
/// tables, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    courses: CourseProfileLookup,
    locations: LocationFacilityResolver,
}

impl RecommendationEngine {
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            courses: CourseProfileLookup::new(reference.courses),
            locations: LocationFacilityResolver::new(reference.facilities, reference.capitals),
        }
    }

    pub fn courses(&self) -> &CourseProfileLookup {
        &self.courses
    }

    pub fn locations(&self) -> &LocationFacilityResolver {
        &self.locations
    }

    pub fn assess(&self, request: &AssessmentRequest) -> Result<CompositeResult> {
        request.profile.validate()?;

        let emotional = EmotionalStateAnalyzer::analyze(
            &request.emotion,
            &request.trigger_events,
            &request.context_text,
        );
        debug!(
            emotion_score = emotional.emotion_score,
            trigger_score = emotional.trigger_score,
            trauma = emotional.trauma_detected,
            sentiment = emotional.sentiment_score,
            "emotional state analysed"
        );

        let course_factor = self.courses.stress_factor(&request.course);
        let (tier, breakdown) = StressScoreAggregator::aggregate(
            &request.base_probabilities,
            course_factor,
            &emotional,
        )?;
        debug!(
            course = request.course.as_str(),
            course_factor,
            final_score = breakdown.final_score,
            tier = %tier,
            "stress score aggregated"
        );

        let recommendations = RecommendationComposer::compose(
            tier,
            &request.course,
            &emotional,
            &request.context_text,
        );
        let course_advice = self.courses.coping_strategies(&request.course, tier);
        let location_facilities = self.locations.resolve(&request.region, &request.locality);

        Ok(CompositeResult {
            original_prediction: request.base_label,
            enhanced_tier: tier,
            breakdown,
            emotional_analysis: emotional,
            personalized_solutions: recommendations.personalized_solutions,
            course_advice,
            location_facilities,
            immediate_actions: recommendations.immediate_actions,
            long_term_strategies: recommendations.long_term_strategies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseProfile, CourseTable};
    use crate::error::AdvisorError;
    use crate::location::{sample_directory, RegionCapitals};
    use crate::models::{sample_profile, StressTier};

    fn engine() -> RecommendationEngine {
        let mut courses = CourseTable::new();
        courses.insert(
            "Engineering".to_string(),
            CourseProfile {
                base_stress_factor: 0.7,
                coping_strategies: Some(vec!["Form lab study pairs".to_string()]),
            },
        );
        RecommendationEngine::new(ReferenceData {
            courses,
            facilities: sample_directory(),
            capitals: RegionCapitals::default(),
        })
    }

    fn request() -> AssessmentRequest {
        AssessmentRequest {
            base_label: StressTier::Good,
            base_probabilities: vec![0.2, 0.6, 0.1, 0.1],
            course: "Engineering".to_string(),
            emotion: "Content".to_string(),
            trigger_events: vec![],
            context_text: String::new(),
            region: "Karnataka".to_string(),
            locality: "Bangalore".to_string(),
            profile: sample_profile(),
        }
    }

    #[test]
    fn calm_request_stays_in_low_tier() {
        let result = engine().assess(&request()).unwrap();
        // 0.7 * (1.1 / 3) + 0.07 + 0.03 + 0.03
        assert!((result.breakdown.final_score - 0.38666666).abs() < 1e-6);
        assert_eq!(result.enhanced_tier, StressTier::Fabulous);
        assert_eq!(result.original_prediction, StressTier::Good);
        assert_eq!(result.course_advice, vec!["Form lab study pairs"]);
        assert!(result.location_facilities.fallback_note.is_none());
        assert_eq!(result.long_term_strategies.len(), 8);
    }

    #[test]
    fn invalid_profile_aborts_request() {
        let mut request = request();
        request.profile.tenth_mark = -3.0;
        assert!(matches!(
            engine().assess(&request),
            Err(AdvisorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn malformed_distribution_aborts_request() {
        let mut request = request();
        request.base_probabilities = vec![0.5, 0.5, 0.5];
        assert!(engine().assess(&request).is_err());
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecommendationEngine>();
    }
}
