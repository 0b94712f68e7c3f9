use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::ReferencePaths;
use crate::course::CourseTable;
use crate::error::{AdvisorError, Result};
use crate::location::{FacilityDirectory, RegionCapitals};

/// The three read-only lookup tables, loaded once before the first request.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub courses: CourseTable,
    pub facilities: FacilityDirectory,
    pub capitals: RegionCapitals,
}

impl ReferenceData {
    pub fn load(paths: &ReferencePaths) -> Result<Self> {
        let courses: CourseTable = read_json(&paths.course_profiles)?;
        validate_courses(&courses)?;

        let facilities: FacilityDirectory = read_json(&paths.facilities)?;
        validate_facilities(&facilities)?;

        let capitals = match &paths.capitals {
            Some(path) => {
                let table: HashMap<String, String> = read_json(path)?;
                RegionCapitals::new(table)
            }
            None => RegionCapitals::default(),
        };

        let localities: usize = facilities.values().map(|l| l.len()).sum();
        info!(
            courses = courses.len(),
            regions = facilities.len(),
            localities,
            capitals = capitals.len(),
            "reference data loaded"
        );

        Ok(Self {
            courses,
            facilities,
            capitals,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| AdvisorError::MissingReferenceData {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| AdvisorError::MalformedReferenceData {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_courses(courses: &CourseTable) -> Result<()> {
    for (name, profile) in courses {
        if name.trim().is_empty() {
            return Err(AdvisorError::InvalidReferenceData {
                table: "course profiles",
                reason: "course name cannot be empty".to_string(),
            });
        }
        let factor = profile.base_stress_factor;
        if !(0.0..=1.0).contains(&factor) {
            return Err(AdvisorError::InvalidReferenceData {
                table: "course profiles",
                reason: format!("{name} has base_stress_factor {factor}, expected 0..=1"),
            });
        }
    }
    Ok(())
}

fn validate_facilities(directory: &FacilityDirectory) -> Result<()> {
    for (region, localities) in directory {
        if region.trim().is_empty() || localities.keys().any(|l| l.trim().is_empty()) {
            return Err(AdvisorError::InvalidReferenceData {
                table: "facility directory",
                reason: format!("empty region or locality name under '{region}'"),
            });
        }
    }
    Ok(())
}
