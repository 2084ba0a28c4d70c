use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use tracing::info;

use crate::app::ports::ProfileOutputPort;
use crate::domain::{QualityReport, VisitRecord};
use crate::pipeline::ingestion::visit_csv::load_visits;
use crate::pipeline::processing::{generate_quality_report, merge_visits};

/// Outcome of one aggregation run
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    pub visits: usize,
    pub profiles: usize,
    pub report: QualityReport,
}

/// Use case for folding per-visit CSV exports into nurse profiles
pub struct AggregateUseCase {
    output: Box<dyn ProfileOutputPort>,
}

impl AggregateUseCase {
    pub fn new(output: Box<dyn ProfileOutputPort>) -> Self {
        Self { output }
    }

    /// Load every source, merge, report and write both documents.
    /// Nothing is written when any source fails to load.
    pub fn run(&self, sources: &[PathBuf]) -> Result<AggregateOutcome> {
        let visits = load_visits(sources).context("Failed to load visit CSVs")?;
        self.process(&visits, Local::now().naive_local())
    }

    /// Merge already-loaded visits, then write profiles and the report.
    pub fn process(&self, visits: &[VisitRecord], generated_at: NaiveDateTime) -> Result<AggregateOutcome> {
        let profiles = merge_visits(visits);
        let report = generate_quality_report(&profiles, generated_at);

        self.output
            .write_profiles(&profiles)
            .context("Failed to save nurse profiles")?;
        self.output
            .write_quality_report(&report)
            .context("Failed to save data quality report")?;

        info!(
            visits = visits.len(),
            profiles = profiles.len(),
            municipalities = report.municipality_distribution.len(),
            "Nurses data processing completed"
        );

        Ok(AggregateOutcome {
            visits: visits.len(),
            profiles: profiles.len(),
            report,
        })
    }
}
