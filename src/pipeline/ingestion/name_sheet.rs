use calamine::{open_workbook_auto, Data, Reader};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::strip_bom;
use crate::constants::{COL_SHEET_FIRST_NAME, COL_SHEET_ID, COL_SHEET_LAST_NAME};
use crate::domain::NameRow;
use crate::error::{NurseDataError, Result};

/// Positions of the name columns in the header row. A column absent from the
/// sheet leaves every row's value missing.
#[derive(Debug, Default, Clone, Copy)]
struct NameColumns {
    id: Option<usize>,
    first_name: Option<usize>,
    last_name: Option<usize>,
}

impl NameColumns {
    fn locate<'a>(path: &Path, headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut columns = Self::default();
        for (idx, header) in headers.into_iter().enumerate() {
            match header.trim() {
                COL_SHEET_ID => columns.id = Some(idx),
                COL_SHEET_FIRST_NAME => columns.first_name = Some(idx),
                COL_SHEET_LAST_NAME => columns.last_name = Some(idx),
                _ => {}
            }
        }
        for (name, position) in [
            (COL_SHEET_ID, columns.id),
            (COL_SHEET_FIRST_NAME, columns.first_name),
            (COL_SHEET_LAST_NAME, columns.last_name),
        ] {
            if position.is_none() {
                warn!(path = %path.display(), column = name, "Name sheet has no such column, using placeholders");
            }
        }
        columns
    }
}

/// Loads the name list from a workbook, or from a CSV when the extension says so.
pub fn load_names(path: &Path) -> Result<Vec<NameRow>> {
    fs::metadata(path).map_err(|e| NurseDataError::read(path, e))?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let rows = if is_csv {
        let bytes = fs::read(path).map_err(|e| NurseDataError::read(path, e))?;
        parse_names_csv(path, &bytes)?
    } else {
        read_names_workbook(path)?
    };

    info!(path = %path.display(), rows = rows.len(), "Loaded nurse names");
    Ok(rows)
}

fn read_names_workbook(path: &Path) -> Result<Vec<NameRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NurseDataError::EmptySheet {
            path: path.to_path_buf(),
        })??;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| NurseDataError::EmptySheet {
        path: path.to_path_buf(),
    })?;
    let header_text: Vec<String> = header
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();
    let columns = NameColumns::locate(path, header_text.iter().map(String::as_str));

    let cell = |row: &[Data], idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(cell_text);

    Ok(rows
        .enumerate()
        .map(|(index, row)| NameRow {
            index,
            id: cell(row, columns.id),
            first_name: cell(row, columns.first_name),
            last_name: cell(row, columns.last_name),
        })
        .collect())
}

/// Parses a CSV name list. Rows may be shorter than the header.
pub fn parse_names_csv(path: &Path, bytes: &[u8]) -> Result<Vec<NameRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(strip_bom(bytes));

    let headers = reader.headers()?.clone();
    let columns = NameColumns::locate(path, headers.iter());

    let field = |record: &csv::StringRecord, idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(NameRow {
            index,
            id: field(&record, columns.id),
            first_name: field(&record, columns.first_name),
            last_name: field(&record, columns.last_name),
        });
    }
    Ok(rows)
}

/// Text of a cell, or `None` for empty and error cells.
/// Whole-number floats render without a fractional part, so numeric ids stay `1234`.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("  ".to_string())), None);
        assert_eq!(cell_text(&Data::String(" דנה ".to_string())), Some("דנה".to_string()));
        assert_eq!(cell_text(&Data::Float(1234.0)), Some("1234".to_string()));
        assert_eq!(cell_text(&Data::Float(12.5)), Some("12.5".to_string()));
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
    }

    #[test]
    fn test_csv_names_with_gaps() {
        let content = "id,first_name,last_name\n101,דנה,כהן\n,רות,\n103\n";
        let rows = parse_names_csv(Path::new("names.csv"), content.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id.as_deref(), Some("101"));
        assert_eq!(rows[0].last_name.as_deref(), Some("כהן"));

        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].id, None);
        assert_eq!(rows[1].first_name.as_deref(), Some("רות"));
        assert_eq!(rows[1].last_name, None);

        assert_eq!(rows[2].id.as_deref(), Some("103"));
        assert_eq!(rows[2].first_name, None);
    }

    #[test]
    fn test_csv_names_missing_column() {
        let content = "first_name,last_name\nדנה,כהן\n";
        let rows = parse_names_csv(Path::new("names.csv"), content.as_bytes()).unwrap();
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].first_name.as_deref(), Some("דנה"));
    }

    #[test]
    fn test_xlsx_names_with_numeric_ids_and_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "id").unwrap();
        sheet.write_string(0, 1, "first_name").unwrap();
        sheet.write_string(0, 2, "last_name").unwrap();
        for i in 0..5u32 {
            sheet.write_number(i + 1, 0, 1001.0 + f64::from(i)).unwrap();
            sheet.write_string(i + 1, 1, format!("שם{i}")).unwrap();
            sheet.write_string(i + 1, 2, format!("משפחה{i}")).unwrap();
        }
        // Row 5 carries only a last name
        sheet.write_string(6, 2, "כהן").unwrap();
        // Trailing row without a last name
        sheet.write_number(7, 0, 1007.0).unwrap();
        sheet.write_string(7, 1, "רות").unwrap();
        workbook.save(&path).unwrap();

        let rows = load_names(&path).unwrap();
        assert_eq!(rows.len(), 7);

        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].id.as_deref(), Some("1001"));
        assert_eq!(rows[0].first_name.as_deref(), Some("שם0"));

        assert_eq!(rows[5].index, 5);
        assert_eq!(rows[5].id, None);
        assert_eq!(rows[5].first_name, None);
        assert_eq!(rows[5].last_name.as_deref(), Some("כהן"));

        assert_eq!(rows[6].id.as_deref(), Some("1007"));
        assert_eq!(rows[6].first_name.as_deref(), Some("רות"));
        assert_eq!(rows[6].last_name, None);
    }

    #[test]
    fn test_missing_sheet_file_is_fatal() {
        let err = load_names(Path::new("/no/such/names.xlsx")).unwrap_err();
        assert!(matches!(err, NurseDataError::Read { .. }));
    }
}
