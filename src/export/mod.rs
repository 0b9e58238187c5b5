//! Two-sheet report exporter.
//!
//! Serializes one physician's detail records back into a workbook:
//! sheet 1 holds every record with a paid/not-paid status column, sheet 2
//! holds only the excluded-institution records. Column headers and sheet
//! names keep the reference report's literals; they are part of the file
//! format its users already know.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};

use crate::error::ExportResult;
use crate::models::{DetailRecord, PhysicianSummary};

/// Sheet 1: every record.
const SHEET_ALL: &str = "Todos los Registros";
/// Sheet 2: excluded-institution records.
const SHEET_UNPAID: &str = "ISSSTE y SUSPE";

const HEADERS: [&str; 5] = [
    "Descripción",
    "Tipo de Cargo",
    "Institución",
    "Mes",
    "Honorarios",
];
const STATUS_HEADER: &str = "Estado";
const STATUS_PAID: &str = "PAGADO";
const STATUS_UNPAID: &str = "NO PAGADO";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("static pattern"));

/// Report file name for a physician: whitespace replaced by underscores.
pub fn report_file_name(physician: &str) -> String {
    format!("Honorarios_{}.xlsx", WHITESPACE.replace_all(physician, "_"))
}

/// Export a physician's report to `dir`, returning the written path.
pub fn export_summary(summary: &PhysicianSummary, dir: &Path) -> ExportResult<PathBuf> {
    let mut workbook = build_workbook(summary)?;
    let path = dir.join(report_file_name(&summary.physician));
    workbook.save(&path)?;
    Ok(path)
}

/// Export a physician's report to an in-memory buffer (HTTP download path).
pub fn export_summary_bytes(summary: &PhysicianSummary) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(summary)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(summary: &PhysicianSummary) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();

    let all = workbook.add_worksheet().set_name(SHEET_ALL)?;
    write_sheet(all, &summary.all_details, true)?;

    let unpaid = workbook.add_worksheet().set_name(SHEET_UNPAID)?;
    write_sheet(unpaid, &summary.unpaid_details, false)?;

    Ok(workbook)
}

fn write_sheet(
    sheet: &mut Worksheet,
    details: &[DetailRecord],
    with_status: bool,
) -> ExportResult<()> {
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("$#,##0.00");

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    if with_status {
        sheet.write_string_with_format(0, HEADERS.len() as u16, STATUS_HEADER, &header_format)?;
    }

    for (i, detail) in details.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &detail.description)?;
        sheet.write_string(row, 1, &detail.charge_type)?;
        sheet.write_string(row, 2, &detail.institution)?;
        sheet.write_string(row, 3, &detail.month_label)?;
        sheet.write_number_with_format(row, 4, detail.amount, &amount_format)?;
        if with_status {
            let status = match detail.is_paid {
                Some(true) => STATUS_PAID,
                _ => STATUS_UNPAID,
            };
            sheet.write_string(row, 5, status)?;
        }
    }

    // Institution names run long; widen the text columns.
    sheet.set_column_width(0, 30)?;
    sheet.set_column_width(2, 50)?;
    sheet.set_column_width(3, 16)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto_from_rs, Reader};
    use std::io::Cursor;

    fn detail(institution: &str, amount: f64, is_paid: Option<bool>) -> DetailRecord {
        DetailRecord {
            description: "Estudio".into(),
            charge_type: "RX".into(),
            institution: institution.into(),
            amount,
            month_label: "Marzo 2023".into(),
            is_paid,
        }
    }

    fn summary_with_unpaid() -> PhysicianSummary {
        let mut s = PhysicianSummary::new("SMITH A");
        s.all_details = vec![
            detail("GENERAL HOSPITAL", 1000.0, Some(true)),
            detail("SINDICATO", 500.0, Some(false)),
        ];
        s.unpaid_details = vec![detail("SINDICATO", 500.0, None)];
        s
    }

    #[test]
    fn test_report_file_name_sanitized() {
        assert_eq!(
            report_file_name("DE HOYOS FERNANDEZ GLADYS"),
            "Honorarios_DE_HOYOS_FERNANDEZ_GLADYS.xlsx"
        );
        assert_eq!(report_file_name("SMITH"), "Honorarios_SMITH.xlsx");
    }

    #[test]
    fn test_export_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_summary(&summary_with_unpaid(), dir.path()).unwrap();
        assert!(path.ends_with("Honorarios_SMITH_A.xlsx"));
        assert!(path.exists());
    }

    #[test]
    fn test_two_sheets_with_expected_rows() {
        let bytes = export_summary_bytes(&summary_with_unpaid()).unwrap();
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.as_slice())).unwrap();

        let names = workbook.sheet_names().to_vec();
        assert_eq!(names, vec![SHEET_ALL.to_string(), SHEET_UNPAID.to_string()]);

        let all = workbook.worksheet_range(SHEET_ALL).unwrap();
        // Header plus two data rows, with the status column.
        assert_eq!(all.height(), 3);
        assert_eq!(all.width(), 6);

        let unpaid = workbook.worksheet_range(SHEET_UNPAID).unwrap();
        assert_eq!(unpaid.height(), 2);
        assert_eq!(unpaid.width(), 5);
    }

    #[test]
    fn test_zero_unpaid_gives_header_only_second_sheet() {
        let mut s = PhysicianSummary::new("SMITH A");
        s.all_details = vec![detail("GENERAL HOSPITAL", 1000.0, Some(true))];

        let bytes = export_summary_bytes(&s).unwrap();
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.as_slice())).unwrap();
        let unpaid = workbook.worksheet_range(SHEET_UNPAID).unwrap();
        // Header row only, no data rows.
        assert_eq!(unpaid.height(), 1);
    }
}
