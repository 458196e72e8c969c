//! Spreadsheet exporter.
//!
//! Serializes a generation batch to an xlsx workbook with a fixed column
//! order, a styled header row and auto-sized columns.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, Workbook};

use crate::entities::{TestCase, EXPORT_COLUMNS};
use crate::errors::{CasegenError, CasegenResult};

/// Worksheet name for exported batches.
const SHEET_NAME: &str = "Test Cases";

/// Header fill color (dark blue, white text).
const HEADER_FILL: u32 = 0x36_6092;

/// Column width cap, in character units.
const MAX_COLUMN_WIDTH: f64 = 50.0;

/// Padding added to the measured width.
const COLUMN_PADDING: f64 = 2.0;

/// Export test cases to an xlsx file.
///
/// When `filename` is `None`, a timestamped `test_cases_<YYYYMMDD_HHMMSS>.xlsx`
/// in the current directory is used. The file is fully written and closed
/// before the path is returned.
pub fn export_to_excel(cases: &[TestCase], filename: Option<&Path>) -> CasegenResult<PathBuf> {
    let path = match filename {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_filename()),
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| export_err(&path, e))?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL));

    for (col, (field, label)) in EXPORT_COLUMNS.iter().copied().enumerate() {
        let col = col as u16;

        worksheet
            .write_string_with_format(0, col, label, &header_format)
            .map_err(|e| export_err(&path, e))?;

        let mut max_len = label.chars().count();
        for (row, case) in cases.iter().enumerate() {
            // Fields outside the record shape are silently skipped
            let Some(value) = case.field(field) else {
                continue;
            };
            max_len = max_len.max(value.chars().count());
            worksheet
                .write_string(row as u32 + 1, col, value)
                .map_err(|e| export_err(&path, e))?;
        }

        let width = (max_len as f64 + COLUMN_PADDING).min(MAX_COLUMN_WIDTH);
        worksheet
            .set_column_width(col, width)
            .map_err(|e| export_err(&path, e))?;
    }

    workbook.save(&path).map_err(|e| export_err(&path, e))?;

    tracing::info!(path = %path.display(), cases = cases.len(), "Exported test cases");
    Ok(path)
}

/// Default timestamped export filename.
pub fn default_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("test_cases_{timestamp}.xlsx")
}

fn export_err(path: &Path, err: rust_xlsxwriter::XlsxError) -> CasegenError {
    CasegenError::FileWrite {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_case(id: &str, name: &str) -> TestCase {
        TestCase {
            test_case_id: id.to_string(),
            test_scenario: "User logs in".to_string(),
            test_case_name: name.to_string(),
            test_steps: "1. Open page\n2. Submit".to_string(),
            expected_result: "Dashboard shown".to_string(),
            actual_result: String::new(),
            status: "Not Executed".to_string(),
            priority: "Medium".to_string(),
            test_type: "Functional".to_string(),
            preconditions: String::new(),
            test_data: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_default_filename_pattern() {
        let name = default_filename();
        assert!(name.starts_with("test_cases_"));
        assert!(name.ends_with(".xlsx"));
        // test_cases_YYYYMMDD_HHMMSS.xlsx
        assert_eq!(name.len(), "test_cases_".len() + 15 + ".xlsx".len());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let cases = vec![sample_case("TC_FUNCTIONAL_001", "Valid login")];
        let written = export_to_excel(&cases, Some(&path)).unwrap();

        assert_eq!(written, path);
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        export_to_excel(&[], Some(&path)).unwrap();
        assert!(path.exists());
    }
}
