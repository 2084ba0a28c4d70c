// Data preparation pipeline: ingestion and processing

pub mod ingestion;
pub mod processing;
