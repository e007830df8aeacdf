//! Domain vocabulary used by scoring and query expansion.
//!
//! Every table here is matched against lowercased text with plain substring
//! tests, so entries must be lowercase.

use ramadvisor_core::RiskProfile;

/// Query terms that signal a category, with the bonus a chunk of that
/// category earns.
pub const CATEGORY_TERMS: &[(&str, f32, &[&str])] = &[
    (
        "Asset Allocation",
        0.3,
        &["allocation", "portfolio", "asset", "portefeuille", "répartition"],
    ),
    (
        "Risk Management",
        0.25,
        &["risk", "conservative", "volatility", "risque", "prudent"],
    ),
    (
        "Investment Strategy",
        0.2,
        &["strategy", "investment", "growth", "stratégie", "investissement"],
    ),
    (
        "Client Management",
        0.15,
        &["client", "wealth", "management", "gestion", "patrimoine"],
    ),
];

/// Static importance of a chunk's category, used to order category fallbacks.
#[must_use]
pub fn category_weight(category: Option<&str>) -> f32 {
    match category {
        Some("Asset Allocation") => 1.0,
        Some("Risk Management") => 0.9,
        Some("Investment Strategy") => 0.8,
        Some("Client Management") => 0.7,
        Some("Tax Planning") => 0.6,
        _ => 0.5,
    }
}

/// Vocabulary a chunk must contain to earn a profile's bonus.
#[must_use]
pub const fn profile_terms(profile: RiskProfile) -> (f32, &'static [&'static str]) {
    match profile {
        RiskProfile::Conservative => (
            0.2,
            &[
                "conservative",
                "prudent",
                "stable",
                "security",
                "preservation",
                "sécurité",
                "low risk",
            ],
        ),
        RiskProfile::Balanced => (
            0.15,
            &[
                "balanced",
                "moderate",
                "diversified",
                "mixed",
                "equilibrium",
                "équilibré",
                "modéré",
                "diversifié",
            ],
        ),
        RiskProfile::Aggressive => (
            0.25,
            &[
                "aggressive",
                "growth",
                "dynamic",
                "opportunity",
                "higher return",
                "audacieux",
                "croissance",
                "dynamique",
            ],
        ),
    }
}

/// Phrase added as an extra query variant when a query names a profile.
#[must_use]
pub const fn profile_anchor(profile: RiskProfile) -> &'static str {
    match profile {
        RiskProfile::Conservative => "conservative investment risk management portfolio",
        RiskProfile::Balanced => "balanced diversified allocation moderate risk",
        RiskProfile::Aggressive => "aggressive growth opportunity higher return",
    }
}

/// Advisory vocabulary counted for context density.
pub const CONTEXT_TERMS: &[&str] = &[
    "portfolio",
    "investment",
    "allocation",
    "wealth",
    "client",
    "strategy",
    "portefeuille",
    "investissement",
    "gestion",
];

/// Terms whose share determines a chunk's content richness.
pub const RICHNESS_TERMS: &[&str] = &[
    "portfolio",
    "investment",
    "allocation",
    "risk",
    "wealth",
    "strategy",
];

/// Source-language domain terms counted when both query and chunk carry them.
pub const SOURCE_DOMAIN_TERMS: &[&str] = &[
    "portefeuille",
    "allocation",
    "diversification",
    "risque",
    "patrimoine",
    "gestion",
    "investissement",
    "retraite",
    "épargne",
    "prudent",
    "équilibré",
    "audacieux",
    "croissance",
    "rendement",
    "volatilité",
    "stratégie",
];

/// Marker the enrichment script writes before appended source-language terms.
pub const SOURCE_TERMS_MARKER: &str = "[termes fr:";

/// Any of these in a chunk marks it as carrying source-language vocabulary.
pub const SOURCE_TERM_HINTS: &[&str] = &[
    "portefeuille",
    "allocation",
    "gestion",
    "patrimoine",
    "risque",
];

/// Source-language concepts and the English terms that stand in for them when
/// no keyword matched directly.
pub const CONCEPT_MAPPINGS: &[(&str, &[&str])] = &[
    ("portefeuille", &["portfolio", "allocation", "investment"]),
    ("retraite", &["retirement", "planning", "long-term"]),
    ("risque", &["risk", "conservative", "volatility"]),
    ("diversification", &["diversification", "allocation", "portfolio"]),
    ("épargne", &["savings", "investment", "accumulation"]),
    ("patrimoine", &["wealth", "management", "portfolio"]),
    ("prudent", &["conservative", "stable", "preservation"]),
    ("équilibré", &["balanced", "moderate", "diversified"]),
    ("audacieux", &["aggressive", "growth", "opportunity"]),
];

/// Source-language concepts whose expansion is appended to the query to form
/// an extra variant.
pub const CONCEPT_EXPANSIONS: &[(&str, &str)] = &[
    ("retraite", "retirement planning long-term savings pension"),
    ("portefeuille", "portfolio allocation diversification investment"),
    ("risque", "risk management volatility conservative prudent"),
    ("patrimoine", "wealth management assets portfolio strategy"),
];

/// Query terms that pick the categories served by the category fallback.
/// Evaluated in order; a query may select several.
pub const FALLBACK_CATEGORY_TERMS: &[(&str, &[&str])] = &[
    ("Asset Allocation", &["allocation", "portefeuille", "portfolio"]),
    ("Risk Management", &["risque", "prudent", "risk", "conservative"]),
    (
        "Investment Strategy",
        &["stratégie", "investissement", "strategy", "investment"],
    ),
];

/// Categories served by the category fallback when the query names none.
pub const DEFAULT_FALLBACK_CATEGORIES: &[&str] = &["Asset Allocation", "Risk Management"];

/// Categories the category fallback should serve for `query_lower`.
#[must_use]
pub fn fallback_categories(query_lower: &str) -> Vec<&'static str> {
    let selected: Vec<&'static str> = FALLBACK_CATEGORY_TERMS
        .iter()
        .filter(|(_, terms)| terms.iter().any(|term| query_lower.contains(term)))
        .map(|(category, _)| *category)
        .collect();

    if selected.is_empty() {
        DEFAULT_FALLBACK_CATEGORIES.to_vec()
    } else {
        selected
    }
}
