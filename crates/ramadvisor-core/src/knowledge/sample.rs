use crate::model::Chunk;

/// Built-in passages served when no knowledge export can be loaded.
///
/// The chunks carry keywords but no stored embedding; the engine derives one
/// from the keywords when it falls back to this set.
#[must_use]
pub fn sample_chunks() -> Vec<Chunk> {
    vec![
        Chunk::new(
            "Asset allocation is a fundamental investment strategy that involves dividing an \
             investment portfolio among different asset categories, such as stocks, bonds, and \
             cash. The purpose of asset allocation is to minimize risk while maximizing returns \
             by investing in different areas that would each react differently to the same event.",
        )
        .with_category("Asset Allocation")
        .with_page(1)
        .with_keywords(["allocation", "portfolio", "diversification", "investment", "strategy"]),
        Chunk::new(
            "Risk management in wealth management involves identifying, analyzing, and \
             mitigating potential risks that could negatively impact a client's financial goals. \
             This includes market risk, credit risk, liquidity risk, and operational risk. \
             Conservative investors typically prefer lower-risk investments.",
        )
        .with_category("Risk Management")
        .with_page(2)
        .with_keywords(["risk", "management", "conservative", "investment", "portfolio"]),
        Chunk::new(
            "Portfolio diversification is the practice of spreading investments across various \
             financial instruments, industries, and other categories to reduce exposure to risk. \
             A well-diversified portfolio typically includes a mix of stocks, bonds, real estate, \
             and other asset classes.",
        )
        .with_category("Asset Allocation")
        .with_page(3)
        .with_keywords(["diversification", "portfolio", "stocks", "bonds", "real estate"]),
        Chunk::new(
            "Retirement planning requires a long-term investment strategy that balances growth \
             potential with capital preservation. As investors approach retirement, portfolios \
             typically shift from aggressive growth strategies to more conservative \
             income-generating investments.",
        )
        .with_category("Investment Strategy")
        .with_page(4)
        .with_keywords(["retirement", "planning", "conservative", "income", "long-term"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_is_usable_and_categorised() {
        let chunks = sample_chunks();
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(Chunk::is_usable));
        assert!(chunks.iter().all(|c| c.topic_category.is_some()));
        assert!(chunks.iter().any(|c| c.in_category("Asset Allocation")));
        assert!(chunks.iter().all(|c| c.embedding.is_none()));
    }
}
