//! Delegated scorer: asks the chat-completion service for the analysis.
//!
//! Never fails from the caller's point of view. A missing key or a failed call
//! yields a degraded analysis (fixed apology, confidence 0.5); an unparseable reply
//! goes through the recovery stages in [`reply`](crate::scoring::reply).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::credentials::CredentialStore;
use crate::llm_client::CompletionService;
use crate::models::{Analysis, Product, ScorerBackend};
use crate::scoring::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM};
use crate::scoring::reply::{ParseStage, ReplyParser};
use crate::scoring::Scorer;

pub const DEGRADED_RECOMMENDATION: &str = "Error analyzing product. Please try again later.";
pub const DEGRADED_CONFIDENCE: f64 = 0.5;

pub struct LlmScorer {
    completion: Arc<dyn CompletionService>,
    credentials: Arc<CredentialStore>,
    parser: ReplyParser,
}

impl LlmScorer {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        credentials: Arc<CredentialStore>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            completion,
            credentials,
            parser: ReplyParser::new()?,
        })
    }

    fn degraded(product: &Product) -> Analysis {
        Analysis::for_product(
            product,
            DEGRADED_RECOMMENDATION.to_string(),
            DEGRADED_CONFIDENCE,
            ScorerBackend::Llm,
        )
    }
}

#[async_trait]
impl Scorer for LlmScorer {
    async fn score(&self, product: &Product) -> Analysis {
        let Some(api_key) = self.credentials.get() else {
            warn!(
                product_id = product.id,
                "No completion API key configured; returning degraded analysis"
            );
            return Self::degraded(product);
        };

        let prompt = build_analysis_prompt(product);
        let text = match self.completion.complete(&api_key, ANALYSIS_SYSTEM, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!(product_id = product.id, error = %e, "LLM analysis failed");
                return Self::degraded(product);
            }
        };

        let reply = self.parser.parse(&text);
        if reply.stage != ParseStage::Strict {
            warn!(
                product_id = product.id,
                stage = ?reply.stage,
                "LLM reply did not match the JSON contract"
            );
        }

        Analysis::for_product(
            product,
            reply.recommendation,
            reply.confidence_score,
            ScorerBackend::Llm,
        )
    }

    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Llm
    }
}
