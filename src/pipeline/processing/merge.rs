use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::domain::{NurseProfile, VisitRecord};

/// Running aggregate for one nurse while visits are folded in.
#[derive(Debug, Clone, Default)]
struct ProfileAccumulator {
    nurse_id: String,
    gender: String,
    specialization: BTreeSet<String>,
    mobility: BTreeSet<String>,
    municipality: BTreeSet<String>,
    updated_at: String,
    status: BTreeSet<String>,
    is_active: bool,
    is_profile_updated: bool,
    is_onboarding_completed: bool,
    is_approved: bool,
    treatment_type: BTreeSet<String>,
}

impl ProfileAccumulator {
    fn new(nurse_id: &str) -> Self {
        Self {
            nurse_id: nurse_id.to_string(),
            ..Default::default()
        }
    }

    fn absorb(&mut self, visit: &VisitRecord) {
        // Scalar fields are last-write-wins
        self.gender = visit.gender.clone();

        self.specialization.insert(visit.specialization.clone());
        self.mobility.insert(visit.mobility.clone());
        self.municipality.insert(visit.municipality.clone());
        self.status.insert(visit.status.clone());
        self.treatment_type.insert(visit.treatment_type.clone());

        if self.updated_at.is_empty() || visit.updated_at > self.updated_at {
            self.updated_at = visit.updated_at.clone();
        }

        self.is_active |= visit.is_active;
        self.is_profile_updated |= visit.is_profile_updated;
        self.is_onboarding_completed |= visit.is_onboarding_completed;
        self.is_approved |= visit.is_approved;
    }

    fn into_profile(self) -> NurseProfile {
        NurseProfile {
            nurse_id: self.nurse_id,
            gender: self.gender,
            specialization: self.specialization.into_iter().collect(),
            mobility: self.mobility.into_iter().collect(),
            municipality: self.municipality.into_iter().collect(),
            updated_at: self.updated_at,
            status: self.status.into_iter().collect(),
            is_active: self.is_active,
            is_profile_updated: self.is_profile_updated,
            is_onboarding_completed: self.is_onboarding_completed,
            is_approved: self.is_approved,
            treatment_type: self.treatment_type.into_iter().collect(),
        }
    }
}

/// Groups visits by nurse id. Profiles come out in order of first appearance.
#[derive(Debug, Default)]
pub struct ProfileMerger {
    positions: HashMap<String, usize>,
    accumulators: Vec<ProfileAccumulator>,
}

impl ProfileMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, visit: &VisitRecord) {
        let position = match self.positions.get(&visit.nurse_id) {
            Some(&position) => position,
            None => {
                let position = self.accumulators.len();
                self.positions.insert(visit.nurse_id.clone(), position);
                self.accumulators.push(ProfileAccumulator::new(&visit.nurse_id));
                position
            }
        };
        self.accumulators[position].absorb(visit);
    }

    pub fn len(&self) -> usize {
        self.accumulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulators.is_empty()
    }

    pub fn finish(self) -> Vec<NurseProfile> {
        self.accumulators
            .into_iter()
            .map(ProfileAccumulator::into_profile)
            .collect()
    }
}

pub fn merge_visits(visits: &[VisitRecord]) -> Vec<NurseProfile> {
    let mut merger = ProfileMerger::new();
    for visit in visits {
        merger.upsert(visit);
    }
    debug!(visits = visits.len(), profiles = merger.len(), "Merged visits into profiles");
    merger.finish()
}
