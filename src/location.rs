//! Location-based facility lookup with capital and same-region fallbacks.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Facility {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityRecord {
    pub hospitals: Vec<Facility>,
    pub counseling_centers: Vec<Facility>,
    pub support_groups: Vec<Facility>,
}

impl FacilityRecord {
    /// A locality listed with no facilities counts as missing.
    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
            && self.counseling_centers.is_empty()
            && self.support_groups.is_empty()
    }
}

/// Region -> locality -> facilities. Ordered so same-region fallback is
/// lexicographic by locality.
pub type FacilityDirectory = BTreeMap<String, BTreeMap<String, FacilityRecord>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
    pub description: &'static str,
}

pub const EMERGENCY_NUMBERS: [EmergencyContact; 5] = [
    EmergencyContact {
        name: "AASRA (24/7 Crisis Helpline)",
        number: "9820466726",
        description: "Suicide prevention and crisis intervention",
    },
    EmergencyContact {
        name: "Vandrevala Foundation",
        number: "9999666555",
        description: "24/7 mental health support",
    },
    EmergencyContact {
        name: "Sneha India",
        number: "044-24640050",
        description: "Emotional support and suicide prevention",
    },
    EmergencyContact {
        name: "iCall (TISS)",
        number: "9152987821",
        description: "Psychosocial helpline (Mon-Sat, 8AM-10PM)",
    },
    EmergencyContact {
        name: "Kiran Mental Health Helpline",
        number: "1800-599-0019",
        description: "Government of India 24/7 mental health support",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityBundle {
    pub hospitals: Vec<Facility>,
    pub counseling_centers: Vec<Facility>,
    pub support_groups: Vec<Facility>,
    pub emergency_numbers: Vec<EmergencyContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_note: Option<String>,
}

impl FacilityBundle {
    fn from_record(record: &FacilityRecord, fallback_note: Option<String>) -> Self {
        Self {
            hospitals: record.hospitals.clone(),
            counseling_centers: record.counseling_centers.clone(),
            support_groups: record.support_groups.clone(),
            emergency_numbers: EMERGENCY_NUMBERS.to_vec(),
            fallback_note,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
            && self.counseling_centers.is_empty()
            && self.support_groups.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCapitals(HashMap<String, String>);

impl RegionCapitals {
    pub fn new(capitals: HashMap<String, String>) -> Self {
        Self(capitals)
    }

    pub fn capital_of(&self, region: &str) -> Option<&str> {
        self.0.get(region).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RegionCapitals {
    /// Capitals of the Indian states and union territories.
    fn default() -> Self {
        let pairs = [
            ("Andhra Pradesh", "Amaravati"),
            ("Arunachal Pradesh", "Itanagar"),
            ("Assam", "Dispur"),
            ("Bihar", "Patna"),
            ("Chhattisgarh", "Raipur"),
            ("Goa", "Panaji"),
            ("Gujarat", "Gandhinagar"),
            ("Haryana", "Chandigarh"),
            ("Himachal Pradesh", "Shimla"),
            ("Jharkhand", "Ranchi"),
            ("Karnataka", "Bangalore"),
            ("Kerala", "Thiruvananthapuram"),
            ("Madhya Pradesh", "Bhopal"),
            ("Maharashtra", "Mumbai"),
            ("Manipur", "Imphal"),
            ("Meghalaya", "Shillong"),
            ("Mizoram", "Aizawl"),
            ("Nagaland", "Kohima"),
            ("Odisha", "Bhubaneswar"),
            ("Punjab", "Chandigarh"),
            ("Rajasthan", "Jaipur"),
            ("Sikkim", "Gangtok"),
            ("Tamil Nadu", "Chennai"),
            ("Telangana", "Hyderabad"),
            ("Tripura", "Agartala"),
            ("Uttar Pradesh", "Lucknow"),
            ("Uttarakhand", "Dehradun"),
            ("West Bengal", "Kolkata"),
            ("Andaman and Nicobar Islands", "Port Blair"),
            ("Chandigarh", "Chandigarh"),
            ("Dadra and Nagar Haveli and Daman and Diu", "Daman"),
            ("Delhi", "New Delhi"),
            ("Jammu and Kashmir", "Srinagar"),
            ("Ladakh", "Leh"),
            ("Lakshadweep", "Kavaratti"),
            ("Puducherry", "Puducherry"),
        ];
        Self(
            pairs
                .into_iter()
                .map(|(region, capital)| (region.to_string(), capital.to_string()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationFacilityResolver {
    directory: FacilityDirectory,
    capitals: RegionCapitals,
}

impl LocationFacilityResolver {
    pub fn new(directory: FacilityDirectory, capitals: RegionCapitals) -> Self {
        Self {
            directory,
            capitals,
        }
    }

    /// Never fails: missing data degrades through capital, then any locality
    /// in the region, then an empty bundle with a generic note. Localities
    /// listed without any facilities are treated as missing at every step.
    pub fn resolve(&self, region: &str, locality: &str) -> FacilityBundle {
        let Some(localities) = self.directory.get(region) else {
            warn!(region, locality, "no facility data for region");
            return generic_bundle(region, locality);
        };
        let listed = |name: &str| localities.get(name).filter(|record| !record.is_empty());

        if let Some(record) = listed(locality) {
            return FacilityBundle::from_record(record, None);
        }

        if let Some(capital) = self.capitals.capital_of(region) {
            if let Some(record) = listed(capital) {
                warn!(region, locality, capital, "substituting state capital facilities");
                let note = format!(
                    "Mental health facilities from {capital} (state capital) as {locality} information not available"
                );
                return FacilityBundle::from_record(record, Some(note));
            }
        }

        if let Some((fallback, record)) = localities.iter().find(|(_, record)| !record.is_empty()) {
            warn!(
                region,
                locality,
                fallback = fallback.as_str(),
                "substituting nearest locality with data"
            );
            let note = format!(
                "Mental health facilities from {fallback} (nearest major city with data) as {locality} information not available"
            );
            return FacilityBundle::from_record(record, Some(note));
        }

        generic_bundle(region, locality)
    }

    pub fn directory(&self) -> &FacilityDirectory {
        &self.directory
    }
}

fn generic_bundle(region: &str, locality: &str) -> FacilityBundle {
    FacilityBundle::from_record(
        &FacilityRecord::default(),
        Some(format!(
            "No specific facility data available for {locality}, {region}. Please contact state health department or search online for local mental health services."
        )),
    )
}

#[cfg(test)]
pub(crate) fn sample_directory() -> FacilityDirectory {
    let facility = |name: &str| Facility {
        name: name.to_string(),
        services: vec!["Counseling".to_string()],
        ..Facility::default()
    };

    let mut karnataka = BTreeMap::new();
    karnataka.insert(
        "Bangalore".to_string(),
        FacilityRecord {
            hospitals: vec![facility("NIMHANS")],
            counseling_centers: vec![facility("Bangalore Campus Wellness")],
            support_groups: vec![],
        },
    );
    karnataka.insert(
        "Mysore".to_string(),
        FacilityRecord {
            hospitals: vec![facility("Mysore District Hospital")],
            ..FacilityRecord::default()
        },
    );

    let mut goa = BTreeMap::new();
    goa.insert(
        "Vasco".to_string(),
        FacilityRecord {
            support_groups: vec![facility("Vasco Peer Circle")],
            ..FacilityRecord::default()
        },
    );
    goa.insert(
        "Margao".to_string(),
        FacilityRecord {
            hospitals: vec![facility("Margao Hospicio")],
            ..FacilityRecord::default()
        },
    );

    let mut directory = FacilityDirectory::new();
    directory.insert("Karnataka".to_string(), karnataka);
    directory.insert("Goa".to_string(), goa);
    directory.insert("Sikkim".to_string(), BTreeMap::new());
    directory
}
