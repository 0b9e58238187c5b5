//! Report configuration.
//!
//! The reference application embedded its domain data as literals: the two
//! excluded institutions, the Spanish month names, the MXN currency format
//! and the default physician selection. All of that is configuration here,
//! loadable from a JSON file; [`ReportConfig::reference`] reproduces the
//! reference data exactly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PipelineResult;
use crate::format::CurrencyFormat;

/// Payer institutions that do not remit honoraria (reference data).
pub const REFERENCE_EXCLUDED_INSTITUTIONS: [&str; 2] = [
    "SINDICATO UNICO DE SERVIDORES PUBLICOS DEL GOBIERNO DEL ESTADO DE NUEVO LEON",
    "INSTITUTO DE SEGURIDAD Y SERVICIOS SOCIALES DE LOS TRABAJADORES DEL ESTADO DE NUEVO LEON",
];

/// Default-selection search term (reference data).
pub const REFERENCE_DEFAULT_SELECTION: &str = "DE HOYOS FERNANDEZ GLADYS";

// =============================================================================
// Month Name Table
// =============================================================================

/// Month names and date sentinel labels for one locale.
///
/// The sentinels live next to the month table so the whole locale surface
/// of a report is a single configuration input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthNames {
    /// Full month names, January first.
    pub months: [String; 12],
    /// Label for rows without a date.
    pub no_date: String,
    /// Label for dates that could not be parsed.
    pub invalid_date: String,
    /// Label for unexpected failures during date resolution.
    pub date_error: String,
}

impl MonthNames {
    /// Spanish table, as shipped by the reference report.
    pub fn spanish() -> Self {
        Self {
            months: [
                "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio",
                "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
            ]
            .map(String::from),
            no_date: "Sin fecha".to_string(),
            invalid_date: "Fecha inválida".to_string(),
            date_error: "Error en fecha".to_string(),
        }
    }

    /// English table.
    pub fn english() -> Self {
        Self {
            months: [
                "January", "February", "March", "April", "May", "June", "July",
                "August", "September", "October", "November", "December",
            ]
            .map(String::from),
            no_date: "No date".to_string(),
            invalid_date: "Invalid date".to_string(),
            date_error: "Date error".to_string(),
        }
    }

    /// Name for a 1-based month number.
    pub fn name(&self, month: u32) -> &str {
        &self.months[(month as usize - 1) % 12]
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::spanish()
    }
}

// =============================================================================
// Report Config
// =============================================================================

/// Configuration for one consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    /// Exclusion terms: an institution containing any of these (case-
    /// insensitive substring) is classified "not paid".
    pub excluded_institutions: Vec<String>,
    /// Search term for the initially selected physician. `None` disables
    /// the hook.
    pub default_selection: Option<String>,
    /// Month names and date sentinels.
    pub month_names: MonthNames,
    /// Currency display format.
    pub currency: CurrencyFormat,
}

impl ReportConfig {
    /// Reference configuration: the two Nuevo León institutions, Spanish
    /// month names, MXN currency and the reference default selection.
    pub fn reference() -> Self {
        Self {
            excluded_institutions: REFERENCE_EXCLUDED_INSTITUTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_selection: Some(REFERENCE_DEFAULT_SELECTION.to_string()),
            month_names: MonthNames::spanish(),
            currency: CurrencyFormat::default(),
        }
    }

    /// Load configuration from a JSON file. Absent fields take their
    /// default values, so a file may override only the exclusion list.
    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reference_config() {
        let config = ReportConfig::reference();
        assert_eq!(config.excluded_institutions.len(), 2);
        assert!(config.excluded_institutions[0].contains("SINDICATO"));
        assert_eq!(
            config.default_selection.as_deref(),
            Some("DE HOYOS FERNANDEZ GLADYS")
        );
        assert_eq!(config.month_names.name(1), "Enero");
    }

    #[test]
    fn test_default_is_empty_exclusions() {
        let config = ReportConfig::default();
        assert!(config.excluded_institutions.is_empty());
        assert!(config.default_selection.is_none());
        // Locale defaults still match the reference report.
        assert_eq!(config.month_names.name(12), "Diciembre");
    }

    #[test]
    fn test_month_name_lookup() {
        let names = MonthNames::english();
        assert_eq!(names.name(1), "January");
        assert_eq!(names.name(12), "December");
    }

    #[test]
    fn test_from_path_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"excludedInstitutions": ["IMSS"]}}"#).unwrap();

        let config = ReportConfig::from_path(file.path()).unwrap();
        assert_eq!(config.excluded_institutions, vec!["IMSS".to_string()]);
        // Untouched fields fall back to defaults.
        assert_eq!(config.month_names.name(3), "Marzo");
        assert_eq!(config.currency.symbol, "$");
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(ReportConfig::from_path("/nonexistent/config.json").is_err());
    }
}
