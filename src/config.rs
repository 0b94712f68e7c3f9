use std::path::PathBuf;

use clap::Args;

/// Where the reference tables live. Flags win over environment variables,
/// which win over the bundled defaults.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ReferencePaths {
    /// Course stress profiles (JSON object keyed by course name)
    #[arg(
        long = "courses",
        env = "STRESS_ADVISOR_COURSES",
        default_value = "data/course_stress_patterns.json",
        global = true
    )]
    pub course_profiles: PathBuf,

    /// Facility directory (JSON object keyed by region, then locality)
    #[arg(
        long,
        env = "STRESS_ADVISOR_FACILITIES",
        default_value = "data/mental_health_facilities.json",
        global = true
    )]
    pub facilities: PathBuf,

    /// Optional region -> capital overrides; the built-in table is used otherwise
    #[arg(long, env = "STRESS_ADVISOR_CAPITALS", global = true)]
    pub capitals: Option<PathBuf>,
}

pub const LOG_ENV_VAR: &str = "STRESS_ADVISOR_LOG";
