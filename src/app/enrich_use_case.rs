use anyhow::{Context, Result};
use rand::RngCore;
use tracing::info;

use crate::app::ports::EnrichedOutputPort;
use crate::domain::{EnrichedProfile, NameRow};
use crate::pipeline::processing::{Enricher, EnrichmentSummary};

/// Use case for turning a name list into enriched nurse profiles
pub struct EnrichUseCase {
    enricher: Box<dyn Enricher>,
    output: Box<dyn EnrichedOutputPort>,
    progress_interval: usize,
}

impl EnrichUseCase {
    pub fn new(
        enricher: Box<dyn Enricher>,
        output: Box<dyn EnrichedOutputPort>,
        progress_interval: usize,
    ) -> Self {
        Self {
            enricher,
            output,
            progress_interval: progress_interval.max(1),
        }
    }

    /// Enrich every row in order, drawing from `rng`.
    pub fn enrich_rows(&self, rows: &[NameRow], rng: &mut dyn RngCore) -> Result<Vec<EnrichedProfile>> {
        info!(rows = rows.len(), "Enriching nurse profiles");

        let mut enriched = Vec::with_capacity(rows.len());
        for row in rows {
            let profile = self
                .enricher
                .enrich(row, rng)
                .with_context(|| format!("Failed to enrich name row {}", row.index))?;
            enriched.push(profile);

            let done = enriched.len();
            if done % self.progress_interval == 0 {
                info!(done, total = rows.len(), "Enrichment progress");
            }
        }
        Ok(enriched)
    }

    /// Enrich, save and summarize.
    pub fn run(&self, rows: &[NameRow], rng: &mut dyn RngCore) -> Result<EnrichmentSummary> {
        let enriched = self.enrich_rows(rows, rng)?;
        self.output
            .write_enriched_profiles(&enriched)
            .context("Failed to save enriched profiles")?;

        let summary = EnrichmentSummary::from_profiles(&enriched);
        info!(
            total = summary.total,
            mean_rating = %format!("{:.2}", summary.mean_rating),
            mean_reviews = %format!("{:.0}", summary.mean_reviews),
            mean_experience_years = %format!("{:.1}", summary.mean_experience_years),
            female = summary.female,
            male = summary.male,
            female_share = %format!("{:.1}%", summary.female_share() * 100.0),
            "Data enrichment complete"
        );
        Ok(summary)
    }
}
