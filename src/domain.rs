use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::constants::FLAG_TRUE;

/// One row of the per-visit nurse export. A nurse appears once per visit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisitRecord {
    pub nurse_id: String,
    pub gender: String,
    /// The export calls the specialization label `name`
    #[serde(rename = "name")]
    pub specialization: String,
    pub mobility: String,
    pub municipality: String,
    #[serde(rename = "updated_at[nurse_nurse]")]
    pub updated_at: String,
    pub status: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_active: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_profile_updated: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_onboarding_completed: bool,
    #[serde(rename = "is_approved[nurse_nurse]", deserialize_with = "deserialize_flag")]
    pub is_approved: bool,
    pub treatment_type: String,
}

/// Flags are exported as exactly `"1"`; every other value, padded ones included, reads as false.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw == FLAG_TRUE)
}

/// Per-nurse aggregate of all visit rows sharing a `nurse_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseProfile {
    pub nurse_id: String,
    pub gender: String,
    pub specialization: Vec<String>,
    pub mobility: Vec<String>,
    pub municipality: Vec<String>,
    pub updated_at: String,
    pub status: Vec<String>,
    pub is_active: bool,
    pub is_profile_updated: bool,
    pub is_onboarding_completed: bool,
    pub is_approved: bool,
    pub treatment_type: Vec<String>,
}

/// Value distributions over the aggregated profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_records: usize,
    pub unique_nurses: usize,
    pub municipality_distribution: BTreeMap<String, usize>,
    pub status_distribution: BTreeMap<String, usize>,
    pub mobility_distribution: BTreeMap<String, usize>,
    pub report_timestamp: String,
}

/// A row of the name sheet. Any cell may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRow {
    /// Zero-based position among the data rows
    pub index: usize,
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

/// A name row combined with synthetic profile attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProfile {
    pub nurse_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub specialization: Vec<String>,
    pub mobility: Vec<String>,
    pub municipality: Vec<String>,
    pub updated_at: String,
    pub status: Vec<String>,
    pub is_active: bool,
    pub is_profile_updated: bool,
    pub is_onboarding_completed: bool,
    pub is_approved: bool,
    pub rating: f64,
    pub reviews_count: i64,
    pub experience_years: i64,
    pub availability: BTreeMap<String, Vec<TimeSlot>>,
    pub languages: Vec<String>,
}
