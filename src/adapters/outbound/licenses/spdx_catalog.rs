use crate::dependency_analysis::domain::{
    LicenseCapabilities, LicenseCategory, LicenseDetails, LicenseObligations, LicenseRiskLevel,
};
use crate::ports::outbound::LicenseService;
use std::collections::BTreeMap;

struct CatalogEntry {
    spdx: &'static str,
    category: LicenseCategory,
    note: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { spdx: "MIT", category: LicenseCategory::Permissive, note: "Keep the copyright notice and license text." },
    CatalogEntry { spdx: "Apache-2.0", category: LicenseCategory::Permissive, note: "Keep notices, state significant changes; includes a patent grant." },
    CatalogEntry { spdx: "BSD-2-Clause", category: LicenseCategory::Permissive, note: "Keep the copyright notice in source and binary distributions." },
    CatalogEntry { spdx: "BSD-3-Clause", category: LicenseCategory::Permissive, note: "Keep the copyright notice; do not use contributor names for endorsement." },
    CatalogEntry { spdx: "ISC", category: LicenseCategory::Permissive, note: "Functionally equivalent to MIT." },
    CatalogEntry { spdx: "PSF-2.0", category: LicenseCategory::Permissive, note: "Keep the PSF notice; summarize changes in derived works." },
    CatalogEntry { spdx: "Zlib", category: LicenseCategory::Permissive, note: "Altered versions must be marked as such." },
    CatalogEntry { spdx: "0BSD", category: LicenseCategory::PublicDomain, note: "No attribution required." },
    CatalogEntry { spdx: "Unlicense", category: LicenseCategory::PublicDomain, note: "Dedicated to the public domain." },
    CatalogEntry { spdx: "CC0-1.0", category: LicenseCategory::PublicDomain, note: "Public domain dedication with fallback license." },
    CatalogEntry { spdx: "MPL-2.0", category: LicenseCategory::WeakCopyleft, note: "Modified MPL files must stay under MPL; larger works may use other terms." },
    CatalogEntry { spdx: "LGPL-2.1-or-later", category: LicenseCategory::WeakCopyleft, note: "Allow relinking against modified versions of the library." },
    CatalogEntry { spdx: "LGPL-3.0-or-later", category: LicenseCategory::WeakCopyleft, note: "Allow relinking against modified versions of the library." },
    CatalogEntry { spdx: "GPL-2.0-or-later", category: LicenseCategory::StrongCopyleft, note: "Distributed derivative works must be released under the GPL." },
    CatalogEntry { spdx: "GPL-3.0-or-later", category: LicenseCategory::StrongCopyleft, note: "Distributed derivative works must be released under the GPL." },
    CatalogEntry { spdx: "AGPL-3.0-or-later", category: LicenseCategory::NetworkCopyleft, note: "Offering the software over a network counts as distribution." },
];

/// Free-form names seen on PyPI mapped to SPDX identifiers. Keys are
/// lowercase with `-only`/`-or-later` and a trailing `+` stripped.
const ALIASES: &[(&str, &str)] = &[
    ("mit license", "MIT"),
    ("the mit license", "MIT"),
    ("expat", "MIT"),
    ("apache", "Apache-2.0"),
    ("apache 2", "Apache-2.0"),
    ("apache 2.0", "Apache-2.0"),
    ("apache-2", "Apache-2.0"),
    ("apache license 2.0", "Apache-2.0"),
    ("apache license, version 2.0", "Apache-2.0"),
    ("apache software license", "Apache-2.0"),
    ("apache software license 2.0", "Apache-2.0"),
    ("bsd", "BSD-3-Clause"),
    ("bsd license", "BSD-3-Clause"),
    ("new bsd", "BSD-3-Clause"),
    ("new bsd license", "BSD-3-Clause"),
    ("3-clause bsd", "BSD-3-Clause"),
    ("simplified bsd", "BSD-2-Clause"),
    ("2-clause bsd", "BSD-2-Clause"),
    ("isc license", "ISC"),
    ("isc license (iscl)", "ISC"),
    ("psf", "PSF-2.0"),
    ("python software foundation license", "PSF-2.0"),
    ("zlib/libpng", "Zlib"),
    ("the unlicense", "Unlicense"),
    ("the unlicense (unlicense)", "Unlicense"),
    ("public domain", "Unlicense"),
    ("mpl 2.0", "MPL-2.0"),
    ("mozilla public license 2.0 (mpl 2.0)", "MPL-2.0"),
    ("lgpl", "LGPL-3.0-or-later"),
    ("lgpl-2.1", "LGPL-2.1-or-later"),
    ("lgplv2", "LGPL-2.1-or-later"),
    ("lgpl-3.0", "LGPL-3.0-or-later"),
    ("lgplv3", "LGPL-3.0-or-later"),
    ("gnu lesser general public license v2 or later (lgplv2+)", "LGPL-2.1-or-later"),
    ("gnu lesser general public license v3 (lgplv3)", "LGPL-3.0-or-later"),
    ("gpl", "GPL-3.0-or-later"),
    ("gpl-2.0", "GPL-2.0-or-later"),
    ("gplv2", "GPL-2.0-or-later"),
    ("gpl-3.0", "GPL-3.0-or-later"),
    ("gplv3", "GPL-3.0-or-later"),
    ("gnu general public license v2 (gplv2)", "GPL-2.0-or-later"),
    ("gnu general public license v3 (gplv3)", "GPL-3.0-or-later"),
    ("agpl-3.0", "AGPL-3.0-or-later"),
    ("agplv3", "AGPL-3.0-or-later"),
    ("gnu affero general public license v3", "AGPL-3.0-or-later"),
];

/// SpdxLicenseCatalog adapter with a built-in table of common licenses
///
/// Accepts SPDX identifiers, the free-form names PyPI packages commonly
/// use, and simple `OR` / `AND` expressions. For `OR` the least
/// restrictive known choice is returned, for `AND` the most restrictive.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpdxLicenseCatalog;

impl SpdxLicenseCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Maps a license string to its canonical SPDX identifier
    pub fn normalize(identifier: &str) -> Option<&'static str> {
        let trimmed = identifier.trim();
        let trimmed = trimmed
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(trimmed)
            .trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();
        let key = lowered
            .strip_suffix("-or-later")
            .or_else(|| lowered.strip_suffix("-only"))
            .or_else(|| lowered.strip_suffix('+'))
            .unwrap_or(&lowered);

        CATALOG
            .iter()
            .find(|entry| {
                let spdx = entry.spdx.to_lowercase();
                spdx == key || spdx.strip_suffix("-or-later") == Some(key)
            })
            .map(|entry| entry.spdx)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == key || *alias == lowered)
                    .map(|(_, spdx)| *spdx)
            })
    }

    fn details(spdx: &str) -> Option<LicenseDetails> {
        let entry = CATALOG.iter().find(|e| e.spdx == spdx)?;
        Some(build_details(entry))
    }

    fn compound(expression: &str, operator: &str) -> Option<Vec<LicenseDetails>> {
        let parts: Vec<&str> = expression.split(operator).collect();
        if parts.len() < 2 {
            return None;
        }
        Some(
            parts
                .into_iter()
                .filter_map(Self::normalize)
                .filter_map(Self::details)
                .collect(),
        )
    }
}

fn build_details(entry: &CatalogEntry) -> LicenseDetails {
    let copyleft = matches!(
        entry.category,
        LicenseCategory::WeakCopyleft | LicenseCategory::StrongCopyleft | LicenseCategory::NetworkCopyleft
    );
    let strong = matches!(
        entry.category,
        LicenseCategory::StrongCopyleft | LicenseCategory::NetworkCopyleft
    );
    let public_domain = entry.category == LicenseCategory::PublicDomain;

    let risk_level = match entry.category {
        LicenseCategory::Permissive | LicenseCategory::PublicDomain => LicenseRiskLevel::Low,
        LicenseCategory::WeakCopyleft => LicenseRiskLevel::Medium,
        LicenseCategory::StrongCopyleft | LicenseCategory::NetworkCopyleft => LicenseRiskLevel::High,
    };

    LicenseDetails {
        spdx: entry.spdx.to_string(),
        category: entry.category,
        risk_level,
        capabilities: LicenseCapabilities {
            use_: true,
            modify: true,
            sell: true,
            saas: entry.category != LicenseCategory::NetworkCopyleft,
        },
        obligations: LicenseObligations {
            attribution: !public_domain,
            include_license: !public_domain,
            state_changes: copyleft || matches!(entry.spdx, "Apache-2.0" | "PSF-2.0" | "Zlib"),
            disclose_source: copyleft,
            share_alike: strong,
            network_copyleft: entry.category == LicenseCategory::NetworkCopyleft,
        },
        localized_notes: BTreeMap::from([("en".to_string(), entry.note.to_string())]),
    }
}

impl LicenseService for SpdxLicenseCatalog {
    fn info(&self, license_identifier: &str) -> Option<LicenseDetails> {
        if let Some(options) = Self::compound(license_identifier, " OR ") {
            return options.into_iter().min_by_key(|d| d.risk_level);
        }
        if let Some(terms) = Self::compound(license_identifier, " AND ") {
            return terms.into_iter().max_by_key(|d| d.risk_level);
        }
        Self::normalize(license_identifier).and_then(Self::details)
    }
}
