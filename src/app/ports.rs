use std::sync::Arc;

use crate::domain::{EnrichedProfile, NurseProfile, QualityReport};

/// Destination for the aggregator's two documents.
pub trait ProfileOutputPort {
    fn write_profiles(&self, profiles: &[NurseProfile]) -> anyhow::Result<()>;
    fn write_quality_report(&self, report: &QualityReport) -> anyhow::Result<()>;
}

/// Destination for the enricher's profile collection.
pub trait EnrichedOutputPort {
    fn write_enriched_profiles(&self, profiles: &[EnrichedProfile]) -> anyhow::Result<()>;
}

// Shared handles let a test keep reading what a use case wrote through a boxed port
impl<T: ProfileOutputPort + ?Sized> ProfileOutputPort for Arc<T> {
    fn write_profiles(&self, profiles: &[NurseProfile]) -> anyhow::Result<()> {
        (**self).write_profiles(profiles)
    }

    fn write_quality_report(&self, report: &QualityReport) -> anyhow::Result<()> {
        (**self).write_quality_report(report)
    }
}

impl<T: EnrichedOutputPort + ?Sized> EnrichedOutputPort for Arc<T> {
    fn write_enriched_profiles(&self, profiles: &[EnrichedProfile]) -> anyhow::Result<()> {
        (**self).write_enriched_profiles(profiles)
    }
}
