//! Excluded-institution classification.
//!
//! An institution is "excluded" (its charges are not paid out as
//! honoraria) when its name contains any configured exclusion term as a
//! case-insensitive substring. The term list is configuration, not logic:
//! see [`crate::config::ReportConfig::excluded_institutions`].

/// Substring classifier over a fixed exclusion term list.
///
/// Terms are uppercased once at construction; each lookup uppercases only
/// the candidate institution.
#[derive(Debug, Clone)]
pub struct Classifier {
    terms: Vec<String>,
}

impl Classifier {
    /// Build a classifier from exclusion terms. Blank terms are dropped,
    /// otherwise every institution would match.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_uppercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// True when the institution contains any exclusion term,
    /// case-insensitively.
    pub fn is_excluded(&self, institution: &str) -> bool {
        let upper = institution.to_uppercase();
        self.terms.iter().any(|term| upper.contains(term.as_str()))
    }

    /// Number of configured terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REFERENCE_EXCLUDED_INSTITUTIONS;

    fn reference() -> Classifier {
        Classifier::new(REFERENCE_EXCLUDED_INSTITUTIONS)
    }

    #[test]
    fn test_exact_match_is_excluded() {
        let classifier = reference();
        assert!(classifier.is_excluded(
            "SINDICATO UNICO DE SERVIDORES PUBLICOS DEL GOBIERNO DEL ESTADO DE NUEVO LEON"
        ));
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = Classifier::new(["issste"]);
        assert!(classifier.is_excluded("Issste Nuevo Leon"));
        assert!(classifier.is_excluded("ISSSTE NUEVO LEON"));
    }

    #[test]
    fn test_substring_containment() {
        let classifier = reference();
        // The institution may carry extra text around the term.
        assert!(classifier.is_excluded(
            "PAGOS - sindicato unico de servidores publicos del gobierno del estado de nuevo leon (NL)"
        ));
    }

    #[test]
    fn test_non_match() {
        let classifier = reference();
        assert!(!classifier.is_excluded("GENERAL HOSPITAL"));
        assert!(!classifier.is_excluded(""));
    }

    #[test]
    fn test_blank_terms_dropped() {
        let classifier = Classifier::new(["", "  "]);
        assert_eq!(classifier.term_count(), 0);
        assert!(!classifier.is_excluded("ANY INSTITUTION"));
    }
}
