use anyhow::Context;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::ports::{EnrichedOutputPort, ProfileOutputPort};
use crate::domain::{EnrichedProfile, NurseProfile, QualityReport};

/// Writes `value` as 2-space indented UTF-8 JSON. Non-ASCII text is kept verbatim.
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize JSON to '{}'", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
    }
    Ok(())
}

/// File-based implementation of ProfileOutputPort
pub struct JsonFileProfileOutput {
    profiles_path: PathBuf,
    report_path: PathBuf,
}

impl JsonFileProfileOutput {
    pub fn new(profiles_path: impl Into<PathBuf>, report_path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let profiles_path = profiles_path.into();
        let report_path = report_path.into();
        ensure_parent_dir(&profiles_path)?;
        ensure_parent_dir(&report_path)?;
        Ok(Self {
            profiles_path,
            report_path,
        })
    }

    pub fn profiles_path(&self) -> &Path {
        &self.profiles_path
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }
}

impl ProfileOutputPort for JsonFileProfileOutput {
    fn write_profiles(&self, profiles: &[NurseProfile]) -> anyhow::Result<()> {
        write_pretty_json(&self.profiles_path, profiles)?;
        info!(path = %self.profiles_path.display(), profiles = profiles.len(), "Wrote nurse profiles");
        Ok(())
    }

    fn write_quality_report(&self, report: &QualityReport) -> anyhow::Result<()> {
        write_pretty_json(&self.report_path, report)?;
        info!(path = %self.report_path.display(), "Wrote data quality report");
        Ok(())
    }
}

/// File-based implementation of EnrichedOutputPort
pub struct JsonFileEnrichedOutput {
    path: PathBuf,
}

impl JsonFileEnrichedOutput {
    pub fn new(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EnrichedOutputPort for JsonFileEnrichedOutput {
    fn write_enriched_profiles(&self, profiles: &[EnrichedProfile]) -> anyhow::Result<()> {
        write_pretty_json(&self.path, profiles)?;
        info!(path = %self.path.display(), profiles = profiles.len(), "Saved enriched nurse profiles");
        Ok(())
    }
}
