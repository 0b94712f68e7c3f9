use std::path::Path;

use serde::Deserialize;

use crate::baseline::predict_baseline;
use crate::error::{AdvisorError, Result};
use crate::models::{AssessmentRequest, StressTier, UserProfile};

#[derive(Debug, Deserialize)]
struct CsvRow {
    tenth_mark: f64,
    twelfth_mark: f64,
    college_mark: f64,
    study_hours: f64,
    social_media_hours: f64,
    travel_minutes: f64,
    career_willingness: f64,
    financial_status: String,
    course: String,
    emotion: String,
    #[serde(default)]
    triggers: String,
    #[serde(default)]
    context: String,
    region: String,
    locality: String,
    #[serde(default)]
    probabilities: Option<String>,
}

/// Reads one assessment request per CSV row.
///
/// Rows with a `probabilities` column use it as the base distribution;
/// otherwise the rule-based baseline fills it in from the profile. A row
/// that fails to decode becomes an `Err` entry; only an unreadable file
/// fails the whole call.
pub fn read_requests(csv_path: &Path) -> Result<Vec<Result<AssessmentRequest>>> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut requests = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        requests.push(result.map_err(AdvisorError::from).and_then(into_request));
    }

    Ok(requests)
}

fn into_request(row: CsvRow) -> Result<AssessmentRequest> {
    let profile = UserProfile {
        tenth_mark: row.tenth_mark,
        twelfth_mark: row.twelfth_mark,
        college_mark: row.college_mark,
        study_hours: row.study_hours,
        social_media_hours: row.social_media_hours,
        travel_minutes: row.travel_minutes,
        career_willingness: row.career_willingness,
        financial_status: row.financial_status.parse()?,
    };

    let (base_label, base_probabilities) = match row.probabilities.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            let probabilities = parse_probabilities(raw)?;
            (most_likely_tier(&probabilities), probabilities)
        }
        _ => {
            let prediction = predict_baseline(&profile);
            (prediction.label, prediction.probabilities.to_vec())
        }
    };

    Ok(AssessmentRequest {
        base_label,
        base_probabilities,
        course: row.course,
        emotion: row.emotion,
        trigger_events: split_list(&row.triggers, ';'),
        context_text: row.context,
        region: row.region,
        locality: row.locality,
        profile,
    })
}

pub fn parse_probabilities(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|value| {
            value.trim().parse::<f64>().map_err(|_| {
                AdvisorError::invalid_argument(format!("'{value}' is not a probability"))
            })
        })
        .collect()
}

pub fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Label of the highest-probability tier; ties go to the less severe tier.
pub fn most_likely_tier(probabilities: &[f64]) -> StressTier {
    let mut best = StressTier::Fabulous;
    let mut best_probability = f64::MIN;
    for (tier, probability) in StressTier::ALL.into_iter().zip(probabilities) {
        if *probability > best_probability {
            best = tier;
            best_probability = *probability;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = concat!(
        "tenth_mark,twelfth_mark,college_mark,study_hours,social_media_hours,",
        "travel_minutes,career_willingness,financial_status,course,emotion,",
        "triggers,context,region,locality,probabilities"
    );

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn reads_rows_with_and_without_probabilities() {
        let file = write_csv(&[
            concat!(
                "80,75,70,6,3,30,50,Good,Engineering,Anxious,",
                "Academic pressure;Exam failure,\"Exams next week, cannot sleep\",",
                "Karnataka,Bangalore,\"0.1,0.1,0.2,0.6\""
            ),
            "45,40,50,2,9,90,20,Awful,MBA,Hopeless,,,Goa,Panaji,",
        ]);

        let requests = read_requests(file.path()).unwrap();
        assert_eq!(requests.len(), 2);

        let first = requests[0].as_ref().unwrap();
        assert_eq!(first.base_probabilities, vec![0.1, 0.1, 0.2, 0.6]);
        assert_eq!(first.base_label, StressTier::Awful);
        assert_eq!(first.trigger_events, vec!["Academic pressure", "Exam failure"]);
        assert_eq!(first.context_text, "Exams next week, cannot sleep");

        let second = requests[1].as_ref().unwrap();
        assert_eq!(second.base_label, StressTier::Awful);
        assert!(second.trigger_events.is_empty());
        assert_eq!(second.profile.financial_status, StressTier::Awful);
    }

    #[test]
    fn bad_row_is_reported_not_dropped() {
        let file = write_csv(&[
            "80,75,70,6,3,30,50,Comfortable,Arts,Happy,,,Delhi,New Delhi,",
            "80,75,70,6,3,30,50,Good,Arts,Happy,,,Delhi,New Delhi,\"0.5,abc\"",
        ]);

        let requests = read_requests(file.path()).unwrap();
        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[0], Err(AdvisorError::InvalidArgument(_))));
        assert!(requests[1].is_err());
    }

    #[test]
    fn undecodable_row_does_not_drop_its_neighbours() {
        let file = write_csv(&[
            "80,75,70,6,3,30,50,Good,Arts,Happy,,,Delhi,New Delhi,",
            "eighty,75,70,6,3,30,50,Good,Arts,Happy,,,Delhi,New Delhi,",
            "60,65,70,8,4,45,40,Bad,MBA,Anxious,,,Goa,Margao,",
        ]);

        let requests = read_requests(file.path()).unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].as_ref().unwrap().course, "Arts");
        assert!(matches!(requests[1], Err(AdvisorError::Csv(_))));
        assert_eq!(requests[2].as_ref().unwrap().locality, "Margao");
    }

    #[test]
    fn missing_file_fails_the_whole_read() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_requests(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn most_likely_tier_prefers_less_severe_on_tie() {
        assert_eq!(most_likely_tier(&[0.1, 0.6, 0.2, 0.1]), StressTier::Good);
        assert_eq!(most_likely_tier(&[0.4, 0.1, 0.1, 0.4]), StressTier::Fabulous);
    }
}
