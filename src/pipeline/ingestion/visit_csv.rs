use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::strip_bom;
use crate::constants::VISIT_COLUMNS;
use crate::domain::VisitRecord;
use crate::error::{NurseDataError, Result};

/// Loads every source in order and concatenates their rows.
///
/// Any missing file, missing column or malformed row fails the whole load.
pub fn load_visits(paths: &[PathBuf]) -> Result<Vec<VisitRecord>> {
    let mut visits = Vec::new();
    for path in paths {
        let records = read_visit_csv(path)?;
        debug!(path = %path.display(), rows = records.len(), "Loaded visit CSV");
        visits.extend(records);
    }
    info!(sources = paths.len(), rows = visits.len(), "Loaded visit records");
    Ok(visits)
}

pub fn read_visit_csv(path: &Path) -> Result<Vec<VisitRecord>> {
    let bytes = fs::read(path).map_err(|e| NurseDataError::read(path, e))?;
    parse_visit_csv(path, &bytes)
}

/// Parses an in-memory CSV. `path` is only used in error messages.
pub fn parse_visit_csv(path: &Path, bytes: &[u8]) -> Result<Vec<VisitRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(strip_bom(bytes));

    let headers = reader.headers()?.clone();
    validate_header(path, &headers)?;

    let records = reader
        .deserialize::<VisitRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

fn validate_header(path: &Path, headers: &csv::StringRecord) -> Result<()> {
    for column in VISIT_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(NurseDataError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "nurse_id,gender,name,mobility,municipality,updated_at[nurse_nurse],status,is_active,is_profile_updated,is_onboarding_completed,is_approved[nurse_nurse],treatment_type";

    fn csv_with(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_parse_rows_and_flags() {
        let content = csv_with(&[
            "N1,FEMALE,WOUND_CARE,WHEELCHAIR,TLV,2024-01-01 10:00:00,CLOSED,1,0,1,0,HOME",
            "N2,MALE,GERIATRICS,WALKER,חיפה,2024-02-01 09:00:00,CANCELLED,0,1,0,1,CLINIC",
        ]);

        let records = parse_visit_csv(Path::new("test.csv"), content.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.nurse_id, "N1");
        assert_eq!(first.specialization, "WOUND_CARE");
        assert_eq!(first.updated_at, "2024-01-01 10:00:00");
        assert!(first.is_active);
        assert!(!first.is_profile_updated);
        assert!(first.is_onboarding_completed);
        assert!(!first.is_approved);

        assert_eq!(records[1].municipality, "חיפה");
        assert!(records[1].is_approved);
    }

    #[test]
    fn test_bom_is_tolerated() {
        let mut content = b"\xEF\xBB\xBF".to_vec();
        content.extend_from_slice(
            csv_with(&["N1,FEMALE,A,B,C,2024,CLOSED,1,1,1,1,T"]).as_bytes(),
        );

        let records = parse_visit_csv(Path::new("bom.csv"), &content).unwrap();
        assert_eq!(records[0].nurse_id, "N1");
    }

    #[test]
    fn test_missing_column_is_reported_before_rows() {
        let content = "nurse_id,gender\nN1,FEMALE\n";
        let err = parse_visit_csv(Path::new("short.csv"), content.as_bytes()).unwrap_err();
        match err {
            NurseDataError::MissingColumn { path, column } => {
                assert_eq!(path, PathBuf::from("short.csv"));
                assert_eq!(column, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_row_missing_fields_is_fatal() {
        let content = csv_with(&[
            "N1,FEMALE,A,B,C,2024,CLOSED,1,1,1,1,T",
            "N2,MALE,A,B",
        ]);
        let err = parse_visit_csv(Path::new("ragged.csv"), content.as_bytes()).unwrap_err();
        assert!(matches!(err, NurseDataError::Csv(_)));
    }

    #[test]
    fn test_only_exact_one_is_true() {
        let content = csv_with(&[
            "N1,FEMALE,A,B,C,2024,CLOSED, 1,1 ,true,01,T",
            "N2,FEMALE,A,B,C,2024,CLOSED,1,,0,1,T",
        ]);
        let visits = parse_visit_csv(Path::new("flags.csv"), content.as_bytes()).unwrap();

        let padded = &visits[0];
        assert!(!padded.is_active);
        assert!(!padded.is_profile_updated);
        assert!(!padded.is_onboarding_completed);
        assert!(!padded.is_approved);

        let exact = &visits[1];
        assert!(exact.is_active);
        assert!(!exact.is_profile_updated);
        assert!(exact.is_approved);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_visits(&[PathBuf::from("/no/such/nurses.csv")]).unwrap_err();
        assert!(matches!(err, NurseDataError::Read { .. }));
    }
}
