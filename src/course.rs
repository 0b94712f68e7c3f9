use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::StressTier;

pub const DEFAULT_STRESS_FACTOR: f64 = 0.5;

const DEFAULT_STRATEGIES: &[&str] = &[
    "Develop effective study habits",
    "Seek help from professors and peers",
    "Maintain work-life balance",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseProfile {
    pub base_stress_factor: f64,
    /// Courses without their own list get the generic strategies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coping_strategies: Option<Vec<String>>,
}

pub type CourseTable = HashMap<String, CourseProfile>;

/// Read-only view over the course stress profiles.
#[derive(Debug, Clone, Default)]
pub struct CourseProfileLookup {
    profiles: CourseTable,
}

impl CourseProfileLookup {
    pub fn new(profiles: CourseTable) -> Self {
        Self { profiles }
    }

    pub fn stress_factor(&self, course: &str) -> f64 {
        self.profiles
            .get(course)
            .map(|profile| profile.base_stress_factor)
            .unwrap_or(DEFAULT_STRESS_FACTOR)
    }

    pub fn coping_strategies(&self, course: &str, tier: StressTier) -> Vec<String> {
        let mut strategies: Vec<String> = self
            .profiles
            .get(course)
            .and_then(|profile| profile.coping_strategies.clone())
            .unwrap_or_else(|| DEFAULT_STRATEGIES.iter().map(|s| s.to_string()).collect());

        if tier.is_elevated() {
            strategies.push(format!("Consider academic counseling for {course} students"));
            strategies.push(
                "Explore stress management workshops specific to your field".to_string(),
            );
            strategies.push(format!("Connect with senior students in {course} for guidance"));
        }

        strategies
    }

    /// Courses sorted by name, for listing.
    pub fn courses(&self) -> Vec<(&str, &CourseProfile)> {
        let mut entries: Vec<_> = self
            .profiles
            .iter()
            .map(|(name, profile)| (name.as_str(), profile))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> CourseProfileLookup {
        let mut profiles = CourseTable::new();
        profiles.insert(
            "Engineering".to_string(),
            CourseProfile {
                base_stress_factor: 0.7,
                coping_strategies: Some(vec![
                    "Break projects into milestones".to_string(),
                    "Pair up for lab work".to_string(),
                ]),
            },
        );
        profiles.insert(
            "Arts".to_string(),
            CourseProfile {
                base_stress_factor: 0.4,
                coping_strategies: None,
            },
        );
        CourseProfileLookup::new(profiles)
    }

    #[test]
    fn known_course_uses_table_factor() {
        assert_eq!(lookup().stress_factor("Engineering"), 0.7);
    }

    #[test]
    fn unknown_course_falls_back_to_defaults() {
        let lookup = lookup();
        assert_eq!(lookup.stress_factor("Astrology"), 0.5);
        let strategies = lookup.coping_strategies("Astrology", StressTier::Good);
        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[0], "Develop effective study habits");
    }

    #[test]
    fn elevated_tiers_append_course_strategies() {
        let lookup = lookup();
        let calm = lookup.coping_strategies("Engineering", StressTier::Fabulous);
        assert_eq!(calm.len(), 2);

        let strained = lookup.coping_strategies("Engineering", StressTier::Awful);
        assert_eq!(strained.len(), 5);
        assert_eq!(strained[2], "Consider academic counseling for Engineering students");
        assert_eq!(strained[4], "Connect with senior students in Engineering for guidance");
    }

    #[test]
    fn repeated_calls_do_not_grow_the_table() {
        let lookup = lookup();
        lookup.coping_strategies("Engineering", StressTier::Bad);
        let again = lookup.coping_strategies("Engineering", StressTier::Bad);
        assert_eq!(again.len(), 5);
    }

    #[test]
    fn listed_course_without_strategies_gets_generic_list() {
        let lookup = lookup();
        assert_eq!(lookup.stress_factor("Arts"), 0.4);

        let strategies = lookup.coping_strategies("Arts", StressTier::Good);
        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[2], "Maintain work-life balance");

        let strained = lookup.coping_strategies("Arts", StressTier::Bad);
        assert_eq!(strained.len(), 6);
        assert_eq!(strained[3], "Consider academic counseling for Arts students");
    }
}
