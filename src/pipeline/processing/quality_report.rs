use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashSet};

use crate::constants::REPORT_TIMESTAMP_FORMAT;
use crate::domain::{NurseProfile, QualityReport};

/// Builds the distribution report for merged profiles.
///
/// A profile contributes once to every value it lists, so distribution totals
/// count (profile, value) pairs rather than profiles.
pub fn generate_quality_report(profiles: &[NurseProfile], generated_at: NaiveDateTime) -> QualityReport {
    let mut municipality_distribution = BTreeMap::new();
    let mut status_distribution = BTreeMap::new();
    let mut mobility_distribution = BTreeMap::new();

    for profile in profiles {
        tally(&mut municipality_distribution, &profile.municipality);
        tally(&mut status_distribution, &profile.status);
        tally(&mut mobility_distribution, &profile.mobility);
    }

    let unique_nurses = profiles
        .iter()
        .map(|p| p.nurse_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    QualityReport {
        total_records: profiles.len(),
        unique_nurses,
        municipality_distribution,
        status_distribution,
        mobility_distribution,
        report_timestamp: generated_at.format(REPORT_TIMESTAMP_FORMAT).to_string(),
    }
}

fn tally(distribution: &mut BTreeMap<String, usize>, values: &[String]) {
    for value in values {
        *distribution.entry(value.clone()).or_insert(0) += 1;
    }
}
