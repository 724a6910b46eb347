//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::extract::extract_json_array;
use crate::llm_client::prompts::build_plan_prompt;
use crate::roadmap::normalize::normalize_roadmap;
use crate::roadmap::progress::{ProgressTracker, RoadmapStats};
use crate::roadmap::schema::{Day, Goals};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    pub goals: Goals,
    #[serde(default)]
    pub has_resume: bool,
}

#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    /// Raw, possibly-unparsed text from the model. Run through
    /// `/api/gemini/normalize` to obtain a canonical roadmap.
    pub plan: String,
}

#[derive(Debug, Deserialize)]
pub struct NormalizePlanRequest {
    pub plan: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizePlanResponse {
    pub roadmap: Vec<Day>,
    /// Baseline aggregates for the fresh roadmap (day and task counts).
    pub stats: RoadmapStats,
}

/// POST /api/gemini/generate-gemini
///
/// Composes the plan prompt from onboarding input and forwards it to Gemini.
/// Returns the raw model text; extraction and normalization are separate
/// steps so an unparseable plan surfaces as an explicit error there.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Json(request): Json<GeneratePlanRequest>,
) -> Result<Json<GeneratePlanResponse>, AppError> {
    if request.goals.target_role.trim().is_empty() {
        return Err(AppError::Validation("targetRole cannot be empty".to_string()));
    }

    let prompt = build_plan_prompt(&request.skills, &request.goals);
    info!(
        skills = request.skills.len(),
        has_resume = request.has_resume,
        "Generating preparation plan"
    );

    let plan = state
        .gemini
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Gemini(e.to_string()))?;

    Ok(Json(GeneratePlanResponse { plan }))
}

/// POST /api/gemini/normalize
///
/// Unwraps a raw plan string (JSON fenced in prose, or bare) into the first
/// top-level array and normalizes it into the canonical roadmap. Extraction
/// failure is a 422, never a silently empty roadmap.
pub async fn handle_normalize_plan(
    State(state): State<AppState>,
    Json(request): Json<NormalizePlanRequest>,
) -> Result<Json<NormalizePlanResponse>, AppError> {
    let raw = extract_json_array(&request.plan).map_err(|e| AppError::Extraction(e.to_string()))?;
    let tracker = ProgressTracker::new(normalize_roadmap(&raw, &state.milestone_policy));
    let stats = tracker.stats();

    Ok(Json(NormalizePlanResponse {
        roadmap: tracker.into_days(),
        stats,
    }))
}
