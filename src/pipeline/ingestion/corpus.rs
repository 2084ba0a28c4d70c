use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{NurseDataError, Result};

/// Value distributions observed in an existing profile collection, used as the
/// reference for synthetic enrichment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorpusPatterns {
    /// Distinct specializations, sorted
    pub specializations: Vec<String>,
    /// Distinct municipalities, sorted
    pub municipalities: Vec<String>,
    /// Number of profiles listing each specialization
    pub specialization_weights: BTreeMap<String, usize>,
    /// Number of profiles listing each municipality
    pub municipality_weights: BTreeMap<String, usize>,
    /// First corpus entry, or an empty object for an empty corpus
    pub sample_record: Value,
    pub corpus_size: usize,
}

impl CorpusPatterns {
    pub fn from_profiles(profiles: &[Value]) -> Self {
        let mut specialization_weights = BTreeMap::new();
        let mut municipality_weights = BTreeMap::new();

        for profile in profiles {
            tally_members(profile, "specialization", &mut specialization_weights);
            tally_members(profile, "municipality", &mut municipality_weights);
        }

        Self {
            specializations: specialization_weights.keys().cloned().collect(),
            municipalities: municipality_weights.keys().cloned().collect(),
            specialization_weights,
            municipality_weights,
            sample_record: profiles
                .first()
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
            corpus_size: profiles.len(),
        }
    }
}

/// Counts each distinct string member of `profile[field]` once.
/// Missing fields, non-arrays and non-string members are skipped.
fn tally_members(profile: &Value, field: &str, weights: &mut BTreeMap<String, usize>) {
    let Some(members) = profile.get(field).and_then(Value::as_array) else {
        return;
    };
    let distinct: BTreeSet<&str> = members.iter().filter_map(Value::as_str).collect();
    for value in distinct {
        *weights.entry(value.to_string()).or_insert(0) += 1;
    }
}

pub fn analyze_corpus(path: &Path) -> Result<CorpusPatterns> {
    let bytes = fs::read(path).map_err(|e| NurseDataError::read(path, e))?;
    let profiles: Vec<Value> = serde_json::from_slice(&bytes)?;
    let patterns = CorpusPatterns::from_profiles(&profiles);

    info!(
        path = %path.display(),
        profiles = patterns.corpus_size,
        specializations = patterns.specializations.len(),
        municipalities = patterns.municipalities.len(),
        "Analyzed reference corpus"
    );
    Ok(patterns)
}
