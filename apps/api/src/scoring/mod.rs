//! Recommendation Engine: pluggable, trait-based scoring of a single product.
//!
//! Default: `RuleScorer` (deterministic, no I/O).
//! Alternative: `LlmScorer` (delegates to the chat-completion service, degrades on failure).
//!
//! `AppState` holds an `Arc<dyn Scorer>`, chosen at startup via `SCORER_BACKEND`.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::credentials::CredentialStore;
use crate::llm_client::LlmClient;
use crate::models::{Analysis, Product, ScorerBackend};

pub mod batch;
pub mod llm;
pub mod prompts;
pub mod reply;
pub mod rules;

pub use batch::{analyze_in_batches, BATCH_SIZE};
pub use llm::LlmScorer;
pub use rules::RuleScorer;

/// The scorer trait. Implement this to swap strategies without touching
/// the handlers or the batch runner.
///
/// `score` is total: every failure inside an implementation is converted into
/// a low-confidence `Analysis` rather than surfaced to the caller.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, product: &Product) -> Analysis;

    fn backend(&self) -> ScorerBackend;
}

/// Builds the scorer for the configured backend.
pub fn build_scorer(
    backend: ScorerBackend,
    api_url: &str,
    credentials: Arc<CredentialStore>,
) -> Result<Arc<dyn Scorer>> {
    let scorer: Arc<dyn Scorer> = match backend {
        ScorerBackend::Rules => Arc::new(RuleScorer),
        ScorerBackend::Llm => {
            let client = LlmClient::new(api_url.to_string())?;
            Arc::new(LlmScorer::new(Arc::new(client), credentials)?)
        }
    };
    Ok(scorer)
}
