use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::roadmap::normalize::MilestonePolicy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub gemini: GeminiClient,
    pub config: Config,
    /// Injectable milestone policy. The two observed generation paths
    /// disagree (every 7th day vs. fixed days), so the choice lives here
    /// rather than inside the normalizer.
    pub milestone_policy: MilestonePolicy,
}
