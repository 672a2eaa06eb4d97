use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::CompletionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Every AI flow goes through this. `LlmClient` in production.
    pub completion: Arc<dyn CompletionService>,
    #[allow(dead_code)]
    pub config: Config,
}
