//! Axum route handlers for roadmap-domain operations that the client runs
//! server-side: assessment grading over a fixed question set.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::roadmap::assessment::AssessmentEngine;
use crate::roadmap::schema::Question;

#[derive(Debug, Deserialize)]
pub struct GradeAssessmentRequest {
    pub questions: Vec<Question>,
    /// One zero-based option index per question, in presentation order.
    pub answers: Vec<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAssessmentResponse {
    pub score: u32,
    pub weak_areas: Vec<String>,
}

/// POST /api/assessment/grade
///
/// Runs one full assessment pass and returns the score and weak areas.
/// The zero-question and out-of-range-answer preconditions are rejected
/// here; the engine itself never sees them.
pub async fn handle_grade_assessment(
    Json(request): Json<GradeAssessmentRequest>,
) -> Result<Json<GradeAssessmentResponse>, AppError> {
    if request.answers.len() != request.questions.len() {
        return Err(AppError::Validation(
            "answers must contain one entry per question".to_string(),
        ));
    }
    if let Some(bad) = request
        .questions
        .iter()
        .find(|q| q.options.len() < 2 || q.correct_answer >= q.options.len())
    {
        return Err(AppError::Validation(format!(
            "question '{}' has an out-of-range correctAnswer",
            bad.id
        )));
    }

    let mut engine = AssessmentEngine::new(request.questions).ok_or_else(|| {
        AppError::Validation("assessment must contain at least one question".to_string())
    })?;

    engine.start();
    let mut outcome = None;
    for &answer in &request.answers {
        outcome = engine.answer(answer);
    }

    // The lengths match, so the final answer completes the pass.
    let outcome = outcome
        .ok_or_else(|| anyhow::anyhow!("assessment pass did not complete"))
        .map_err(AppError::Internal)?;

    Ok(Json(GradeAssessmentResponse {
        score: outcome.score,
        weak_areas: outcome.weak_areas,
    }))
}
