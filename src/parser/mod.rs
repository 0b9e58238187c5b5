//! Spreadsheet ingestion: workbook rows in, typed billing records out.
//!
//! The first sheet of each workbook is converted to JSON row objects keyed
//! by the header row, then coerced into [`BillingRecord`]s with defaulting.
//! No row is rejected for a bad field: missing strings default to `""`,
//! missing or non-numeric amounts to `0.0`. Rows without a `Doctor` value
//! survive parsing (with an empty physician) and are skipped by the
//! aggregator.

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use serde_json::{json, Map, Value};
use std::io::Cursor;
use std::path::Path;

use crate::error::{WorkbookError, WorkbookResult};
use crate::models::{BillingRecord, RawDate};

/// Accepted header spellings per record field; first match wins.
const DOCTOR_COLUMNS: [&str; 1] = ["Doctor"];
const INSTITUTION_COLUMNS: [&str; 2] = ["Institucion", "Institution"];
const AMOUNT_COLUMNS: [&str; 2] = ["Honorarios", "Fees"];
const CHARGE_TYPE_COLUMNS: [&str; 2] = ["TipoCargo", "ChargeType"];
const DESCRIPTION_COLUMNS: [&str; 2] = ["Descripcion", "Description"];
const DATE_COLUMNS: [&str; 2] = ["Fechainterpreta", "fechainterpreta"];

/// Result of reading one workbook's first sheet.
#[derive(Debug, Clone)]
pub struct SheetRows {
    /// Name of the sheet that was read.
    pub sheet: String,
    /// Column headers from the first row.
    pub headers: Vec<String>,
    /// Data rows as JSON objects keyed by header. Empty cells are omitted.
    pub rows: Vec<Value>,
}

/// Read the first sheet of a workbook file (xlsx, xls, xlsb, ods).
pub fn parse_workbook_file(path: impl AsRef<Path>) -> WorkbookResult<SheetRows> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    first_sheet_rows(&mut workbook)
}

/// Read the first sheet of an in-memory workbook (HTTP upload path).
pub fn parse_workbook_bytes(bytes: &[u8]) -> WorkbookResult<SheetRows> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    first_sheet_rows(&mut workbook)
}

fn first_sheet_rows<RS>(workbook: &mut Sheets<RS>) -> WorkbookResult<SheetRows>
where
    RS: std::io::Read + std::io::Seek,
{
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(WorkbookError::NoSheets)?;

    let range = workbook.worksheet_range(&sheet)?;
    let mut row_iter = range.rows();

    let header_row = row_iter
        .next()
        .ok_or_else(|| WorkbookError::EmptySheet(sheet.clone()))?;
    let headers: Vec<String> = header_row.iter().map(header_text).collect();

    let mut rows = Vec::new();
    for row in row_iter {
        let mut obj = Map::new();
        for (i, cell) in row.iter().enumerate() {
            let Some(header) = headers.get(i) else { continue };
            if header.is_empty() {
                continue;
            }
            if let Some(value) = cell_to_value(cell) {
                obj.insert(header.clone(), value);
            }
        }
        // Fully blank rows carry no information.
        if !obj.is_empty() {
            rows.push(Value::Object(obj));
        }
    }

    Ok(SheetRows { sheet, headers, rows })
}

/// Render a header cell as column-name text.
fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => format!("{}", n),
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => format!("{}", b),
        _ => String::new(),
    }
}

/// Convert a data cell to its JSON value. Empty and error cells become
/// `None` so the row object omits them, matching how the source exports
/// behave in the reference tool.
fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(json!(s))
            }
        }
        Data::Float(n) => Some(json!(n)),
        Data::Int(n) => Some(json!(n)),
        Data::Bool(b) => Some(json!(b)),
        // Keep the serial so date resolution sees the same value the
        // spreadsheet stores.
        Data::DateTime(dt) => Some(json!(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(json!(s)),
    }
}

/// Convert parsed rows into typed billing records with defaulting.
pub fn rows_to_records(rows: &[Value]) -> Vec<BillingRecord> {
    rows.iter().map(row_to_record).collect()
}

fn row_to_record(row: &Value) -> BillingRecord {
    BillingRecord {
        physician: string_field(row, &DOCTOR_COLUMNS),
        institution: string_field(row, &INSTITUTION_COLUMNS),
        amount: amount_field(row),
        charge_type: string_field(row, &CHARGE_TYPE_COLUMNS),
        description: string_field(row, &DESCRIPTION_COLUMNS),
        raw_date: date_field(row),
    }
}

fn field<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| row.get(key))
}

fn string_field(row: &Value, keys: &[&str]) -> String {
    match field(row, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn amount_field(row: &Value) -> f64 {
    match field(row, &AMOUNT_COLUMNS) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => coerce_amount(s),
        _ => 0.0,
    }
}

fn date_field(row: &Value) -> RawDate {
    match field(row, &DATE_COLUMNS) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(serial) => RawDate::Serial(serial),
            None => RawDate::Empty,
        },
        Some(Value::String(s)) if !s.trim().is_empty() => RawDate::Text(s.clone()),
        _ => RawDate::Empty,
    }
}

/// Best-effort numeric coercion with `parseFloat` semantics: the longest
/// numeric prefix of the trimmed string, or `0.0` when there is none.
pub fn coerce_amount(raw: &str) -> f64 {
    let s = raw.trim();
    if let Ok(v) = s.parse::<f64>() {
        return if v.is_finite() { v } else { 0.0 };
    }

    let mut best = 0.0;
    for (idx, _) in s.char_indices().skip(1) {
        if let Ok(v) = s[..idx].parse::<f64>() {
            if v.is_finite() {
                best = v;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_row_to_record_spanish_headers() {
        let row = json!({
            "Doctor": "SMITH A",
            "Institucion": "GENERAL HOSPITAL",
            "Honorarios": 1000.0,
            "TipoCargo": "RX",
            "Descripcion": "Thorax",
            "Fechainterpreta": 45000.0,
        });
        let record = row_to_record(&row);
        assert_eq!(record.physician, "SMITH A");
        assert_eq!(record.institution, "GENERAL HOSPITAL");
        assert_eq!(record.amount, 1000.0);
        assert_eq!(record.raw_date, RawDate::Serial(45000.0));
    }

    #[test]
    fn test_row_to_record_english_headers() {
        let row = json!({
            "Doctor": "SMITH A",
            "Institution": "GENERAL HOSPITAL",
            "Fees": "500.5",
            "ChargeType": "CT",
            "Description": "Skull",
            "fechainterpreta": "2023-03-15",
        });
        let record = row_to_record(&row);
        assert_eq!(record.institution, "GENERAL HOSPITAL");
        assert_eq!(record.amount, 500.5);
        assert_eq!(record.charge_type, "CT");
        assert_eq!(record.raw_date, RawDate::Text("2023-03-15".into()));
    }

    #[test]
    fn test_missing_fields_default() {
        let record = row_to_record(&json!({ "Honorarios": "abc" }));
        assert_eq!(record.physician, "");
        assert_eq!(record.institution, "");
        assert_eq!(record.amount, 0.0);
        assert!(record.raw_date.is_empty());
    }

    #[test]
    fn test_coerce_amount_parse_float_semantics() {
        assert_eq!(coerce_amount("1234.5"), 1234.5);
        assert_eq!(coerce_amount("  42  "), 42.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount(""), 0.0);
        // Longest numeric prefix, like parseFloat.
        assert_eq!(coerce_amount("1,200.00"), 1.0);
        assert_eq!(coerce_amount("100 pesos"), 100.0);
        assert_eq!(coerce_amount("-12.5x"), -12.5);
    }

    #[test]
    fn test_parse_workbook_bytes_first_sheet() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Doctor").unwrap();
        sheet.write_string(0, 1, "Honorarios").unwrap();
        sheet.write_string(1, 0, "SMITH A").unwrap();
        sheet.write_number(1, 1, 1000.0).unwrap();
        // A blank row between data rows is dropped entirely.
        sheet.write_string(3, 0, "JONES B").unwrap();
        sheet.write_number(3, 1, 250.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let parsed = parse_workbook_bytes(&bytes).unwrap();
        assert_eq!(parsed.headers, vec!["Doctor", "Honorarios"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0]["Doctor"], "SMITH A");
        assert_eq!(parsed.rows[1]["Honorarios"], 250.0);

        let records = rows_to_records(&parsed.rows);
        assert_eq!(records[0].physician, "SMITH A");
        assert_eq!(records[1].amount, 250.0);
    }

    #[test]
    fn test_parse_workbook_bytes_not_a_workbook() {
        assert!(parse_workbook_bytes(b"this is not a spreadsheet").is_err());
    }
}
