/// Longest free-text `license` value still treated as an identifier.
/// Many packages paste the full license text into this field.
const MAX_LICENSE_IDENTIFIER_LENGTH: usize = 64;

/// Prefix of trove classifiers that name an OSI approved license
const OSI_CLASSIFIER_PREFIX: &str = "License :: OSI Approved :: ";

/// LicensePriority policy for choosing a package's license from registry metadata
///
/// Priority order:
/// 1. `license_expression` (PEP 639 SPDX expression) if non-empty
/// 2. `license` field if it looks like an identifier (non-empty, not "UNKNOWN",
///    single line, short)
/// 3. first OSI Approved license from the classifiers
pub struct LicensePriority;

impl LicensePriority {
    pub fn select_license(
        license: Option<String>,
        license_expression: Option<String>,
        classifiers: &[String],
    ) -> Option<String> {
        license_expression
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .or_else(|| license.filter(|l| Self::is_identifier_like(l)))
            .or_else(|| Self::extract_license_from_classifiers(classifiers))
    }

    fn is_identifier_like(license: &str) -> bool {
        let trimmed = license.trim();
        !trimmed.is_empty()
            && !trimmed.eq_ignore_ascii_case("UNKNOWN")
            && !trimmed.contains('\n')
            && trimmed.len() <= MAX_LICENSE_IDENTIFIER_LENGTH
    }

    fn extract_license_from_classifiers(classifiers: &[String]) -> Option<String> {
        classifiers
            .iter()
            .find_map(|c| c.strip_prefix(OSI_CLASSIFIER_PREFIX))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_license_prefers_expression() {
        let result = LicensePriority::select_license(
            Some("MIT".to_string()),
            Some("Apache-2.0".to_string()),
            &["License :: OSI Approved :: BSD License".to_string()],
        );
        assert_eq!(result, Some("Apache-2.0".to_string()));
    }

    #[test]
    fn test_select_license_falls_back_to_license_field() {
        let result =
            LicensePriority::select_license(Some("BSD-3-Clause".to_string()), None, &[]);
        assert_eq!(result, Some("BSD-3-Clause".to_string()));
    }

    #[test]
    fn test_select_license_skips_full_license_text() {
        let full_text = "Copyright (c) 2010 Someone\n\nPermission is hereby granted...".to_string();
        let result = LicensePriority::select_license(
            Some(full_text),
            None,
            &["License :: OSI Approved :: MIT License".to_string()],
        );
        assert_eq!(result, Some("MIT License".to_string()));
    }

    #[test]
    fn test_select_license_ignores_unknown_and_blank() {
        assert_eq!(
            LicensePriority::select_license(Some("UNKNOWN".to_string()), Some("  ".to_string()), &[]),
            None
        );
    }

    #[test]
    fn test_extract_license_from_classifiers() {
        let classifiers = vec![
            "Development Status :: 5 - Production/Stable".to_string(),
            "License :: OSI Approved :: Apache Software License".to_string(),
        ];
        assert_eq!(
            LicensePriority::extract_license_from_classifiers(&classifiers),
            Some("Apache Software License".to_string())
        );
        assert_eq!(LicensePriority::extract_license_from_classifiers(&[]), None);
    }
}
