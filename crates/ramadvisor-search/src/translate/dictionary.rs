//! French → English financial vocabulary.

/// Word-level mappings, looked up after punctuation is stripped from a token.
pub const TERMS: &[(&str, &str)] = &[
    // Investment goals
    ("portefeuille", "portfolio"),
    ("diversification", "diversification"),
    ("diversifié", "diversified"),
    ("diversifiée", "diversified"),
    ("retraite", "retirement"),
    ("épargne", "savings"),
    ("investissement", "investment"),
    ("placement", "investment"),
    ("allocation", "allocation"),
    ("répartition", "allocation"),
    // Risk
    ("risque", "risk"),
    ("risques", "risks"),
    ("minimiser", "minimize"),
    ("réduire", "reduce"),
    ("volatilité", "volatility"),
    ("sécurité", "security"),
    ("stabilité", "stability"),
    ("prudent", "conservative"),
    ("conservateur", "conservative"),
    ("prudence", "conservative"),
    ("audacieux", "aggressive"),
    ("agressif", "aggressive"),
    ("équilibré", "balanced"),
    ("modéré", "moderate"),
    // Asset classes
    ("actions", "stocks"),
    ("obligations", "bonds"),
    ("immobilier", "real estate"),
    ("liquidité", "liquidity"),
    ("or", "gold"),
    // Strategy
    ("croissance", "growth"),
    ("rendement", "yield"),
    ("revenu", "income"),
    ("patrimoine", "wealth"),
    ("gestion", "management"),
    ("stratégie", "strategy"),
    ("planification", "planning"),
    ("conseil", "advice"),
    ("recommandation", "recommendation"),
    ("optimisation", "optimization"),
    ("performance", "performance"),
];

/// Multi-word expressions, replaced before any word-level lookup.
pub const EXPRESSIONS: &[(&str, &str)] = &[
    ("constituer un portefeuille", "build portfolio"),
    ("gestion de patrimoine", "wealth management"),
    ("allocation d'actifs", "asset allocation"),
    ("profil de risque", "risk profile"),
    ("tolérance au risque", "risk tolerance"),
    ("horizon d'investissement", "investment horizon"),
    ("objectifs financiers", "financial objectives"),
    ("planification financière", "financial planning"),
    ("gestion des risques", "risk management"),
    ("stratégie d'investissement", "investment strategy"),
    ("préparation retraite", "retirement planning"),
    ("épargne retraite", "retirement savings"),
    ("minimiser les risques", "minimize risks"),
    ("maximiser les rendements", "maximize returns"),
    ("matières premières", "commodities"),
];

/// Dropped from translated queries, in both languages.
pub const STOP_WORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "du", "de", "pour", "avec", "sans", "dans", "sur", "en",
    "et", "ou", "à", "au", "aux", "the", "a", "an", "and", "or", "but", "in", "on", "at", "to",
    "for", "of", "with", "by",
];

/// Appended to sparse translated queries.
pub const DOMAIN_ANCHORS: &[&str] = &["portfolio", "wealth", "management"];
