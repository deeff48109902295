//! One line of build report input.

use crate::model::is_placeholder_serial;

/// A raw build report row, trimmed but otherwise unvalidated.
///
/// `sheet_row` is the 1-indexed position in the original sheet (header is
/// row 1), used for diagnostic messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReportRow {
    pub sheet_row: usize,
    pub alt_assy_name: String,
    pub alt_assy_part_number: String,
    pub alt_assy_serial_number: String,
    pub part_name: String,
    pub part_number: String,
    pub part_serial_number: String,
    pub operating_hours: String,
    pub life_limit: String,
}

impl BuildReportRow {
    /// Whether this row carries assembly identity columns.
    ///
    /// All-placeholder assembly columns mean the part stands alone at the
    /// tree root.
    #[must_use]
    pub fn has_assembly(&self) -> bool {
        !(is_placeholder_serial(&self.alt_assy_name)
            && is_placeholder_serial(&self.alt_assy_part_number)
            && is_placeholder_serial(&self.alt_assy_serial_number))
    }

    /// Assembly grouping key: `partNumber|serialNumber`.
    #[must_use]
    pub fn assembly_key(&self) -> String {
        format!(
            "{}|{}",
            self.alt_assy_part_number.trim(),
            self.alt_assy_serial_number.trim()
        )
    }

    /// Mandatory part column that is missing, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.part_name.trim().is_empty() {
            Some("part name")
        } else if self.part_number.trim().is_empty() {
            Some("part number")
        } else if self.part_serial_number.trim().is_empty() {
            Some("part serial number")
        } else {
            None
        }
    }
}

/// Lenient numeric parse for hours / life-limit columns.
///
/// Operator spreadsheets routinely carry blanks and annotations in these
/// cells; anything non-numeric reads as 0 rather than failing the row.
#[must_use]
pub fn parse_hours(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> BuildReportRow {
        BuildReportRow {
            sheet_row: 2,
            alt_assy_name: "Fan".into(),
            alt_assy_part_number: "FN-1".into(),
            alt_assy_serial_number: "SN-A".into(),
            part_name: "Blade".into(),
            part_number: "BL-1".into(),
            part_serial_number: "SN-B".into(),
            operating_hours: "10".into(),
            life_limit: "100".into(),
        }
    }

    #[test]
    fn placeholder_assembly_columns_mean_standalone() {
        let mut r = row();
        r.alt_assy_name = "-".into();
        r.alt_assy_part_number = String::new();
        r.alt_assy_serial_number = "N/A".into();
        assert!(!r.has_assembly());
        assert!(row().has_assembly());
    }

    #[test]
    fn missing_field_names_the_first_gap() {
        let mut r = row();
        r.part_number = "  ".into();
        assert_eq!(r.missing_field(), Some("part number"));
        assert_eq!(row().missing_field(), None);
    }

    #[test]
    fn hours_parse_is_lenient() {
        assert_eq!(parse_hours("12.5"), 12.5);
        assert_eq!(parse_hours(" 40 "), 40.0);
        assert_eq!(parse_hours("TBD"), 0.0);
        assert_eq!(parse_hours(""), 0.0);
    }
}
