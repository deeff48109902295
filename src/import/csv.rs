//! CSV reading for build reports.
//!
//! Columns are taken by position (see the module docs in
//! [`crate::import`]); header text is kept only for humans and never
//! validated here.

use super::row::BuildReportRow;
use crate::error::{FleetError, ImportErrorKind, Result};
use std::io::Read;
use std::path::Path;

/// Number of columns a build report carries.
const COLUMN_COUNT: usize = 8;

/// Read a build report from a file on disk.
pub fn read_build_report(path: &Path) -> Result<Vec<BuildReportRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| FleetError::io(path, "failed to open build report", e))?;
    read_build_report_from_reader(file, &path.display().to_string())
}

/// Read a build report from any reader. `source` names the input in
/// diagnostics (a path, "stdin", a test label).
pub fn read_build_report_from_reader<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<BuildReportRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    // Data starts at sheet row 2; the header occupies row 1.
    for (i, record) in csv_reader.records().enumerate() {
        let sheet_row = i + 2;
        let record = record.map_err(|e| {
            FleetError::import(
                source,
                ImportErrorKind::Csv {
                    row: sheet_row,
                    message: e.to_string(),
                },
            )
        })?;

        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        if record.len() < COLUMN_COUNT {
            tracing::debug!(
                sheet_row,
                columns = record.len(),
                "short row padded with empty columns"
            );
        }

        rows.push(BuildReportRow {
            sheet_row,
            alt_assy_name: field(0),
            alt_assy_part_number: field(1),
            alt_assy_serial_number: field(2),
            part_name: field(3),
            part_number: field(4),
            part_serial_number: field(5),
            operating_hours: field(6),
            life_limit: field(7),
        });
    }

    tracing::debug!(source, rows = rows.len(), "build report read");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Assy Name,Assy PN,Assy SN,Part Name,Part Number,Part SN,Operating Hours,Life Limit\n";

    #[test]
    fn reads_rows_with_sheet_numbering() {
        let input = format!(
            "{HEADER}Fan,FN-1,SN-A,Blade,BL-1,SN-B,10,100\n-,-,-,Oil pump,OP-9,SN-C,10,300\n"
        );
        let rows = read_build_report_from_reader(input.as_bytes(), "test").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sheet_row, 2);
        assert_eq!(rows[0].part_serial_number, "SN-B");
        assert_eq!(rows[1].sheet_row, 3);
        assert!(!rows[1].has_assembly());
    }

    #[test]
    fn short_rows_read_as_empty_columns() {
        let input = format!("{HEADER}Fan,FN-1,SN-A,Blade,BL-1\n");
        let rows = read_build_report_from_reader(input.as_bytes(), "test").unwrap();
        assert_eq!(rows[0].part_serial_number, "");
        assert_eq!(rows[0].operating_hours, "");
    }

    #[test]
    fn header_only_input_yields_no_rows() {
        let rows = read_build_report_from_reader(HEADER.as_bytes(), "test").unwrap();
        assert!(rows.is_empty());
    }
}
