use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::NurseDataError;
use crate::pipeline::ingestion::strip_bom;

/// What the local dataset currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub csv_path: PathBuf,
    pub nurses: usize,
}

/// Placeholder for pulling fresh nurse data from the external provider.
///
/// There is no provider client: the run inspects the local CSV and reports
/// how many data rows it has.
pub struct SyncUseCase {
    csv_path: PathBuf,
}

impl SyncUseCase {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }

    pub fn run(&self) -> Result<SyncReport> {
        warn!("Provider sync is not implemented, using the existing local CSV");
        info!("To refresh the data: request a data export from the provider and replace the local CSV with it");

        let nurses = count_data_rows(&self.csv_path)
            .with_context(|| format!("Failed to inspect '{}'", self.csv_path.display()))?;
        info!(path = %self.csv_path.display(), nurses, "Current dataset");

        Ok(SyncReport {
            csv_path: self.csv_path.clone(),
            nurses,
        })
    }
}

/// Number of rows after the header. Rows may have any number of fields, and a
/// blank line counts as an empty row.
pub fn count_data_rows(path: &Path) -> crate::error::Result<usize> {
    let bytes = fs::read(path).map_err(|e| NurseDataError::read(path, e))?;
    let content = strip_bom(&bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    // The reader skips blank lines, so count them in the gap before each record
    let mut record = csv::ByteRecord::new();
    let mut rows = 0usize;
    let mut span_start = 0usize;
    while reader.read_byte_record(&mut record)? {
        let span_end = reader.position().byte() as usize;
        rows += 1 + blank_lines(content, span_start, span_end);
        span_start = span_end;
    }
    rows += blank_lines(content, span_start, content.len());
    Ok(rows.saturating_sub(1))
}

/// Empty lines at the start of `content[start..end]`. A `\n` completing the
/// previous record's `\r\n` is not a line of its own.
fn blank_lines(content: &[u8], start: usize, end: usize) -> usize {
    let mut gap = content.get(start..end).unwrap_or(&[]);
    if start > 0 && content.get(start - 1) == Some(&b'\r') {
        gap = gap.strip_prefix(b"\n").unwrap_or(gap);
    }

    let mut count = 0;
    loop {
        match gap {
            [b'\r', b'\n', rest @ ..] | [b'\r' | b'\n', rest @ ..] => {
                count += 1;
                gap = rest;
            }
            _ => return count,
        }
    }
}
