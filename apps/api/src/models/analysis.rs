use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::product::{Category, Product, ProductId};

/// Which scoring strategy produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerBackend {
    Rules,
    Llm,
}

impl FromStr for ScorerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" | "local" => Ok(ScorerBackend::Rules),
            "llm" | "openai" | "delegated" => Ok(ScorerBackend::Llm),
            other => Err(format!(
                "unknown scorer backend '{other}' (expected 'rules' or 'llm')"
            )),
        }
    }
}

impl fmt::Display for ScorerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerBackend::Rules => f.write_str("rules"),
            ScorerBackend::Llm => f.write_str("llm"),
        }
    }
}

/// Display banding of a confidence score: High ≥ 0.85, Medium ≥ 0.75, else Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn of(score: f64) -> Self {
        if score >= 0.85 {
            ConfidenceLevel::High
        } else if score >= 0.75 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Recommendation and confidence derived from exactly one product.
/// Built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub product_id: ProductId,
    pub name: String,
    pub category: Category,
    /// Currency-formatted price, e.g. `$999.99`.
    pub price: String,
    pub recommendation: String,
    pub confidence_score: f64,
    pub confidence_level: ConfidenceLevel,
    pub scorer_backend: ScorerBackend,
}

impl Analysis {
    pub fn for_product(
        product: &Product,
        recommendation: String,
        confidence_score: f64,
        scorer_backend: ScorerBackend,
    ) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.formatted_price(),
            recommendation,
            confidence_score,
            confidence_level: ConfidenceLevel::of(confidence_score),
            scorer_backend,
        }
    }
}
