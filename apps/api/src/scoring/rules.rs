//! Rule-based scorer: a fixed (category, price band) recommendation table plus an
//! additive confidence formula.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{Analysis, Category, PriceBand, Product, ScorerBackend};
use crate::scoring::Scorer;

const BASE_CONFIDENCE: f64 = 0.75;
const HIGH_PRICE_BONUS: f64 = 0.15;
const MID_PRICE_BONUS: f64 = 0.08;
const PRIVILEGED_CATEGORY_BONUS: f64 = 0.07;
const MAX_CONFIDENCE: f64 = 0.97;

pub const GENERIC_RECOMMENDATION: &str = "Standard recommendation based on customer feedback.";

/// Deterministic scorer. No I/O, never suspends.
pub struct RuleScorer;

#[async_trait]
impl Scorer for RuleScorer {
    async fn score(&self, product: &Product) -> Analysis {
        score_product(product)
    }

    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Rules
    }
}

pub fn score_product(product: &Product) -> Analysis {
    Analysis::for_product(
        product,
        recommendation_for(&product.category, product.price_band()).to_string(),
        confidence_for(product),
        ScorerBackend::Rules,
    )
}

/// Band-specific entries first, then the per-category message, then the generic one.
pub fn recommendation_for(category: &Category, band: PriceBand) -> &'static str {
    match (category, band) {
        (Category::Infrastructure, PriceBand::Low) => {
            "A cost-effective entry point for applications with high availability requirements."
        }
        (Category::Support, PriceBand::Low) => {
            "Recommended for small teams without dedicated DevOps personnel."
        }
        (Category::Security, PriceBand::High) => {
            "Recommended for organizations exposing public APIs at scale. Pair with an identity provider."
        }
        (Category::Software, _) => {
            "Highly recommended for enterprise development teams. Consider bundling with support."
        }
        (Category::Service, _) => {
            "Recommended for organizations with complex identity requirements."
        }
        (Category::Infrastructure, _) => {
            "Essential for applications with high availability requirements."
        }
        (Category::Support, _) => "Recommended for teams without dedicated DevOps personnel.",
        (Category::Security, _) => {
            "Recommended for organizations exposing public APIs. Pair with an identity provider."
        }
        (Category::Authentication, _) => {
            "Recommended as the foundation of a centralized identity strategy."
        }
        (Category::Integration, _) => {
            "Recommended for teams connecting existing applications to an identity provider."
        }
        (Category::Other(_), _) => GENERIC_RECOMMENDATION,
    }
}

/// 0.75 base, +0.15 above 500 (else +0.08 above 200), +0.07 for Software/Service,
/// clamped to [0, 0.97]. Both price comparisons are strict.
pub fn confidence_for(product: &Product) -> f64 {
    let mut score = BASE_CONFIDENCE;

    if product.price > Decimal::from(500) {
        score += HIGH_PRICE_BONUS;
    } else if product.price > Decimal::from(200) {
        score += MID_PRICE_BONUS;
    }

    if is_privileged(&product.category) {
        score += PRIVILEGED_CATEGORY_BONUS;
    }

    score.clamp(0.0, MAX_CONFIDENCE)
}

fn is_privileged(category: &Category) -> bool {
    matches!(category, Category::Software | Category::Service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::str::FromStr;

    fn product(category: &str, price: &str) -> Product {
        Product::new(
            1,
            "Test Product",
            Category::from(category),
            Decimal::from_str(price).unwrap(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_software_above_500_hits_cap() {
        let analysis = score_product(&product("Software", "999.99"));
        assert!(approx(analysis.confidence_score, 0.97));
        assert_eq!(
            analysis.recommendation,
            "Highly recommended for enterprise development teams. Consider bundling with support."
        );
    }

    #[test]
    fn test_privileged_above_500_always_capped() {
        for category in ["Software", "Service"] {
            for price in ["500.01", "899.99", "10000"] {
                let score = confidence_for(&product(category, price));
                assert!(approx(score, 0.97), "{category} @ {price} scored {score}");
            }
        }
    }

    #[test]
    fn test_cheap_non_privileged_is_base() {
        for category in ["Infrastructure", "Support", "Security", "Hardware"] {
            for price in ["0", "149.99", "200"] {
                let score = confidence_for(&product(category, price));
                assert_eq!(score, 0.75, "{category} @ {price}");
            }
        }
    }

    #[test]
    fn test_thresholds_are_strict() {
        // 500 is not "> 500", so it only earns the mid bonus.
        assert!(approx(confidence_for(&product("Support", "500")), 0.83));
        assert!(approx(confidence_for(&product("Support", "500.01")), 0.90));
        assert!(approx(confidence_for(&product("Support", "200.01")), 0.83));
        assert!(approx(confidence_for(&product("Service", "499.99")), 0.90));
    }

    #[test]
    fn test_confidence_always_within_bounds() {
        for category in ["Software", "Service", "Security", "Other"] {
            for price in ["0", "1", "199", "201", "499", "500", "501", "1000000"] {
                let score = confidence_for(&product(category, price));
                assert!((0.0..=0.97).contains(&score), "{category} @ {price} scored {score}");
            }
        }
    }

    #[test]
    fn test_unknown_category_gets_generic_message() {
        let analysis = score_product(&product("Hardware", "650"));
        assert_eq!(analysis.recommendation, GENERIC_RECOMMENDATION);
        assert!(approx(analysis.confidence_score, 0.90));
    }

    #[test]
    fn test_band_specific_entries_override_category_message() {
        assert_eq!(
            recommendation_for(&Category::Support, PriceBand::Low),
            "Recommended for small teams without dedicated DevOps personnel."
        );
        assert_eq!(
            recommendation_for(&Category::Support, PriceBand::Medium),
            "Recommended for teams without dedicated DevOps personnel."
        );
        assert!(recommendation_for(&Category::Security, PriceBand::High).contains("at scale"));
        assert!(!recommendation_for(&Category::Security, PriceBand::Medium).contains("at scale"));
    }

    #[test]
    fn test_every_known_category_has_its_own_message() {
        let known = [
            Category::Software,
            Category::Service,
            Category::Infrastructure,
            Category::Support,
            Category::Security,
            Category::Authentication,
            Category::Integration,
        ];
        for category in known {
            for band in [PriceBand::Low, PriceBand::Medium, PriceBand::High] {
                assert_ne!(recommendation_for(&category, band), GENERIC_RECOMMENDATION);
            }
        }
    }

    #[test]
    fn test_seeded_catalog_scores() {
        let catalog = Catalog::seeded();
        let expected = [
            (1, 0.97),
            (2, 0.90),
            (3, 0.75),
            (4, 0.83),
            (5, 0.82),
            (6, 0.97),
        ];
        for (id, score) in expected {
            let analysis = score_product(catalog.get(id).unwrap());
            assert!(
                approx(analysis.confidence_score, score),
                "product {id} scored {}",
                analysis.confidence_score
            );
            assert_eq!(analysis.scorer_backend, ScorerBackend::Rules);
        }
    }

    #[tokio::test]
    async fn test_trait_dispatch_matches_direct_call() {
        let scorer: &dyn Scorer = &RuleScorer;
        let p = product("Service", "499.99");
        assert_eq!(scorer.score(&p).await, score_product(&p));
    }
}
