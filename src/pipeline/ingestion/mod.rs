//! Readers for the three input shapes: the per-visit CSV export, the name
//! sheet and the existing profile corpus.

pub mod corpus;
pub mod name_sheet;
pub mod visit_csv;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Spreadsheet tools often prefix CSV exports with a UTF-8 BOM.
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBFnurse_id"), b"nurse_id");
        assert_eq!(strip_bom(b"nurse_id"), b"nurse_id");
        assert_eq!(strip_bom(b""), b"");
    }
}
