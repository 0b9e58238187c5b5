//! Date-to-month resolution.
//!
//! Billing exports carry dates in three shapes: nothing at all, a numeric
//! spreadsheet serial, or a date-like string. [`month_label`] resolves any
//! of them into a `"<MonthName> <Year>"` label, falling back to sentinel
//! labels from the configured [`MonthNames`] table. It never fails.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::config::MonthNames;
use crate::models::RawDate;

/// Milliseconds per day, the serial-date unit scale.
const MS_PER_DAY: f64 = 86_400_000.0;

/// String date formats accepted in order. Day-first before month-first,
/// since the reference data is Mexican.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Resolve a raw date cell into a month label.
///
/// - Absent cell → the no-date sentinel.
/// - Numeric serial → days since 1899-12-30, converted by adding
///   `value × 86 400 000` ms to that epoch. Serial 45000 → March 2023.
/// - String → generic parsing (RFC 3339, then [`DATE_FORMATS`]).
/// - Unparseable string → the invalid-date sentinel.
/// - Arithmetic overflow or a non-finite serial → the date-error sentinel.
pub fn month_label(raw: &RawDate, names: &MonthNames) -> String {
    match raw {
        RawDate::Empty => names.no_date.clone(),
        RawDate::Serial(n) => serial_to_label(*n, names),
        RawDate::Text(s) => text_to_label(s, names),
    }
}

fn serial_to_label(serial: f64, names: &MonthNames) -> String {
    let millis = serial * MS_PER_DAY;
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return names.date_error.clone();
    }

    let epoch = match NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(dt) => dt,
        None => return names.date_error.clone(),
    };

    match epoch.checked_add_signed(Duration::milliseconds(millis as i64)) {
        Some(dt) => label_for(dt.date(), names),
        None => names.date_error.clone(),
    }
}

fn text_to_label(text: &str, names: &MonthNames) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return names.no_date.clone();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return label_for(dt.date_naive(), names);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return label_for(dt.date(), names);
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return label_for(date, names);
        }
    }

    names.invalid_date.clone()
}

fn label_for(date: NaiveDate, names: &MonthNames) -> String {
    use chrono::Datelike;
    format!("{} {}", names.name(date.month()), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish() -> MonthNames {
        MonthNames::spanish()
    }

    #[test]
    fn test_empty_is_no_date() {
        assert_eq!(month_label(&RawDate::Empty, &spanish()), "Sin fecha");
    }

    #[test]
    fn test_known_serial_pair() {
        // 45000 days after 1899-12-30 is 2023-03-15.
        assert_eq!(
            month_label(&RawDate::Serial(45000.0), &spanish()),
            "Marzo 2023"
        );
    }

    #[test]
    fn test_serial_fractional_day() {
        // Time-of-day fraction does not change the month.
        assert_eq!(
            month_label(&RawDate::Serial(45000.75), &spanish()),
            "Marzo 2023"
        );
    }

    #[test]
    fn test_serial_epoch_reference() {
        // Serial 2 is 1900-01-01 in the 1899-12-30 epoch convention.
        assert_eq!(month_label(&RawDate::Serial(2.0), &spanish()), "Enero 1900");
    }

    #[test]
    fn test_non_finite_serial_is_date_error() {
        assert_eq!(
            month_label(&RawDate::Serial(f64::NAN), &spanish()),
            "Error en fecha"
        );
        assert_eq!(
            month_label(&RawDate::Serial(f64::INFINITY), &spanish()),
            "Error en fecha"
        );
    }

    #[test]
    fn test_iso_string() {
        assert_eq!(
            month_label(&RawDate::Text("2024-01-05".into()), &spanish()),
            "Enero 2024"
        );
    }

    #[test]
    fn test_day_first_string() {
        assert_eq!(
            month_label(&RawDate::Text("05/02/2024".into()), &spanish()),
            "Febrero 2024"
        );
    }

    #[test]
    fn test_rfc3339_string() {
        assert_eq!(
            month_label(&RawDate::Text("2023-12-31T10:00:00-06:00".into()), &spanish()),
            "Diciembre 2023"
        );
    }

    #[test]
    fn test_garbage_string_is_invalid_date() {
        assert_eq!(
            month_label(&RawDate::Text("mañana".into()), &spanish()),
            "Fecha inválida"
        );
    }

    #[test]
    fn test_blank_string_is_no_date() {
        assert_eq!(month_label(&RawDate::Text("  ".into()), &spanish()), "Sin fecha");
    }

    #[test]
    fn test_english_table() {
        let names = MonthNames::english();
        assert_eq!(month_label(&RawDate::Empty, &names), "No date");
        assert_eq!(month_label(&RawDate::Serial(45000.0), &names), "March 2023");
        assert_eq!(
            month_label(&RawDate::Text("never".into()), &names),
            "Invalid date"
        );
    }
}
