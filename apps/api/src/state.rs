use std::sync::Arc;

use crate::catalog::Catalog;
use crate::credentials::CredentialStore;
use crate::scoring::Scorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Pluggable scorer. Default: RuleScorer. Swap via SCORER_BACKEND=llm.
    pub scorer: Arc<dyn Scorer>,
    /// Completion-service key; shared with `LlmScorer` so runtime updates reach it.
    pub credentials: Arc<CredentialStore>,
}
