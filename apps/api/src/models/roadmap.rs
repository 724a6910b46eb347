use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted roadmap document. Saves are insert-only: every save creates
/// a new row and there is no update, merge, or conflict detection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoadmapRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Vec<String>,
    /// Career goals plus the sanitized resume text, stored as an opaque
    /// JSONB document.
    pub goals: Value,
    pub has_resume: bool,
    /// Roadmap steps snapshot, stored as an opaque JSONB document. A flat
    /// snapshot, not an event log.
    pub steps: Value,
    pub created_at: DateTime<Utc>,
}
