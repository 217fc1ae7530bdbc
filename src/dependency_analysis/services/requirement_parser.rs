use std::collections::HashSet;
use tracing::debug;

/// RequirementParser extracts dependency names from raw requirement strings
/// such as `"urllib3<3,>=1.21.1"` or `"PySocks!=1.5.7,>=1.5.6; extra == \"socks\""`.
pub struct RequirementParser;

impl RequirementParser {
    /// Extracts dependency names from a package's requirement list.
    ///
    /// - the name is the leading run of ASCII letters, digits, `-`, `_`, `.`
    /// - requirements gated behind an optional extra are dropped
    /// - specifiers without a leading name are skipped individually
    /// - duplicates within this list are removed, first occurrence wins
    pub fn parse<S: AsRef<str>>(specifiers: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        for raw in specifiers {
            let raw = raw.as_ref();
            if Self::is_extra_only(raw) {
                continue;
            }
            match Self::leading_name(raw) {
                Some(name) => {
                    if seen.insert(name.to_string()) {
                        names.push(name.to_string());
                    }
                }
                None => debug!(specifier = raw, "skipping malformed requirement specifier"),
            }
        }

        names
    }

    fn leading_name(specifier: &str) -> Option<&str> {
        let trimmed = specifier.trim_start();
        let end = trimmed
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(trimmed.len());
        let name = &trimmed[..end];
        (!name.is_empty()).then_some(name)
    }

    /// True when the environment marker (after `;`) references an extra
    fn is_extra_only(specifier: &str) -> bool {
        specifier
            .split_once(';')
            .map(|(_, marker)| {
                marker
                    .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .any(|token| token == "extra")
            })
            .unwrap_or(false)
    }
}
