// Pipeline processing: merging, reporting, sampling and synthetic enrichment

pub mod enrich;
pub mod merge;
pub mod quality_report;
pub mod sampling;

pub use enrich::{DefaultEnricher, Enricher, EnrichmentSummary};
pub use merge::merge_visits;
pub use quality_report::generate_quality_report;
