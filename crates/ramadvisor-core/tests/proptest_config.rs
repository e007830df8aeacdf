use proptest::prelude::*;
use ramadvisor_core::{AdvisorConfig, RiskProfile, SearchConfig};

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    // Lenient profile tags never fail and agree with strict parsing.
    #[test]
    fn from_tag_agrees_with_parse(tag in "\\PC{0,16}") {
        let lenient = RiskProfile::from_tag(Some(&tag));
        let strict = tag.parse::<RiskProfile>().unwrap_or_default();
        prop_assert_eq!(lenient, strict);
    }

    // A partial [search] table overrides only what it names.
    #[test]
    fn partial_search_table_keeps_defaults(
        max_results in 1usize..50,
        threshold in 0.0f32..1.0,
    ) {
        let raw = format!("[search]\nmax_results = {max_results}\nsimilarity_threshold = {threshold:?}\n");
        let config: AdvisorConfig = toml::from_str(&raw).expect("valid toml");
        let defaults = SearchConfig::default();

        prop_assert_eq!(config.search.max_results, max_results);
        prop_assert!((config.search.similarity_threshold - threshold).abs() < 1e-6);
        prop_assert_eq!(config.search.mode, defaults.mode);
        prop_assert_eq!(config.search.embedding_dim, defaults.embedding_dim);
        prop_assert_eq!(config.prompt, AdvisorConfig::default().prompt);
    }
}
