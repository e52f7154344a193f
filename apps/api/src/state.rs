use std::sync::Arc;

use crate::interview::store::BatchStore;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Adapter for the provider this deployment is wired to.
    pub llm: Arc<dyn CompletionClient>,
    pub store: Arc<dyn BatchStore>,
}
