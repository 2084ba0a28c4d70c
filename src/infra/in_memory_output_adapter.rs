use std::sync::Mutex;

use crate::app::ports::{EnrichedOutputPort, ProfileOutputPort};
use crate::domain::{EnrichedProfile, NurseProfile, QualityReport};

/// In-memory output implementation for development/testing
#[derive(Default)]
pub struct InMemoryOutput {
    profiles: Mutex<Vec<NurseProfile>>,
    report: Mutex<Option<QualityReport>>,
    enriched: Mutex<Vec<EnrichedProfile>>,
}

impl InMemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(&self) -> Vec<NurseProfile> {
        self.profiles.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn report(&self) -> Option<QualityReport> {
        self.report.lock().ok().and_then(|r| r.clone())
    }

    pub fn enriched(&self) -> Vec<EnrichedProfile> {
        self.enriched.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow::anyhow!("in-memory output lock poisoned")
}

impl ProfileOutputPort for InMemoryOutput {
    fn write_profiles(&self, profiles: &[NurseProfile]) -> anyhow::Result<()> {
        *self.profiles.lock().map_err(poisoned)? = profiles.to_vec();
        Ok(())
    }

    fn write_quality_report(&self, report: &QualityReport) -> anyhow::Result<()> {
        *self.report.lock().map_err(poisoned)? = Some(report.clone());
        Ok(())
    }
}

impl EnrichedOutputPort for InMemoryOutput {
    fn write_enriched_profiles(&self, profiles: &[EnrichedProfile]) -> anyhow::Result<()> {
        *self.enriched.lock().map_err(poisoned)? = profiles.to_vec();
        Ok(())
    }
}
