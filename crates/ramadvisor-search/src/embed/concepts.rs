//! Concept tables for the pseudo-embedder.
//!
//! Each entry maps a trigger term to a 10-component concept vector. Dimensions
//! roughly group as: 0-2 allocation, 3-5 risk, 6-9 asset classes.

pub type ConceptVector = [f32; 10];

/// Bilingual table used in multilingual mode.
pub const MULTILINGUAL: &[(&str, ConceptVector)] = &[
    ("allocation", [1.0, 0.8, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("répartition", [1.0, 0.8, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("diversification", [0.8, 1.0, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("portfolio", [0.9, 0.9, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("portefeuille", [0.9, 0.9, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("risk", [0.0, 0.0, 0.0, 1.0, 0.8, 0.6, 0.0, 0.0, 0.0, 0.0]),
    ("risque", [0.0, 0.0, 0.0, 1.0, 0.8, 0.6, 0.0, 0.0, 0.0, 0.0]),
    ("conservative", [0.0, 0.0, 0.0, 0.8, 0.6, 1.0, 0.0, 0.0, 0.0, 0.0]),
    ("prudent", [0.0, 0.0, 0.0, 0.8, 0.6, 1.0, 0.0, 0.0, 0.0, 0.0]),
    ("volatility", [0.0, 0.0, 0.0, 0.7, 1.0, 0.8, 0.0, 0.0, 0.0, 0.0]),
    ("volatilité", [0.0, 0.0, 0.0, 0.7, 1.0, 0.8, 0.0, 0.0, 0.0, 0.0]),
    ("stocks", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.8, 0.0, 0.0]),
    ("actions", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.8, 0.0, 0.0]),
    ("bonds", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.2, 1.0, 0.8]),
    ("obligations", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.2, 1.0, 0.8]),
    ("retirement", [0.6, 0.4, 0.8, 0.3, 0.2, 0.7, 0.5, 0.3, 0.4, 0.2]),
    ("retraite", [0.6, 0.4, 0.8, 0.3, 0.2, 0.7, 0.5, 0.3, 0.4, 0.2]),
    ("wealth", [0.7, 0.5, 0.9, 0.2, 0.1, 0.4, 0.6, 0.4, 0.3, 0.5]),
    ("patrimoine", [0.7, 0.5, 0.9, 0.2, 0.1, 0.4, 0.6, 0.4, 0.3, 0.5]),
];

/// English-only table used in basic mode.
pub const BASIC: &[(&str, ConceptVector)] = &[
    ("allocation", [1.0, 0.8, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("diversification", [0.8, 1.0, 0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("portfolio", [0.9, 0.9, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("risk", [0.0, 0.0, 0.0, 1.0, 0.8, 0.6, 0.0, 0.0, 0.0, 0.0]),
    ("volatility", [0.0, 0.0, 0.0, 0.7, 1.0, 0.8, 0.0, 0.0, 0.0, 0.0]),
    ("conservative", [0.0, 0.0, 0.0, 0.8, 0.6, 1.0, 0.0, 0.0, 0.0, 0.0]),
    ("prudent", [0.0, 0.0, 0.0, 0.8, 0.5, 0.9, 0.0, 0.0, 0.0, 0.0]),
    ("equity", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.8, 0.0, 0.0]),
    ("bond", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.2, 1.0, 0.8]),
    ("alternative", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.3, 0.2, 1.0]),
    ("retirement", [0.6, 0.4, 0.8, 0.3, 0.2, 0.7, 0.5, 0.3, 0.4, 0.2]),
];
