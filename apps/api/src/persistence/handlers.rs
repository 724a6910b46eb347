//! Axum route handlers for the Roadmap persistence API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::roadmap::RoadmapRow;
use crate::persistence::{
    extract_resume_text, insert_roadmap, sanitize_resume_text, SaveRoadmapRequest,
};
use crate::roadmap::schema::Goals;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SaveRoadmapResponse {
    pub message: String,
    pub roadmap: RoadmapRow,
}

/// POST /api/roadmap
///
/// Saves a roadmap document. Insert-only: a repeat save creates a new record.
pub async fn handle_save_roadmap(
    State(state): State<AppState>,
    Json(request): Json<SaveRoadmapRequest>,
) -> Result<(StatusCode, Json<SaveRoadmapResponse>), AppError> {
    let roadmap = insert_roadmap(&state.db, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveRoadmapResponse {
            message: "Roadmap saved successfully".to_string(),
            roadmap,
        }),
    ))
}

/// POST /api/roadmap/upload
///
/// Multipart form with a `resume` file field plus a `goals` JSON field and
/// optional `title` / `description` / `skills` fields. Extracts plain text
/// from the resume, sanitizes it onto the goals object, and saves a new
/// roadmap document.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SaveRoadmapResponse>), AppError> {
    let mut resume: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut goals: Option<Goals> = None;
    let mut request = SaveRoadmapRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume file: {e}")))?;
                resume = Some((filename, content_type, data.to_vec()));
            }
            "goals" => {
                let text = read_text_field(field).await?;
                goals = Some(
                    serde_json::from_str(&text)
                        .map_err(|_| AppError::Validation("goals must be a JSON object".to_string()))?,
                );
            }
            "skills" => {
                let text = read_text_field(field).await?;
                request.skills = serde_json::from_str(&text).unwrap_or_default();
            }
            "title" => request.title = Some(read_text_field(field).await?),
            "description" => request.description = Some(read_text_field(field).await?),
            _ => {}
        }
    }

    let (filename, content_type, data) =
        resume.ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    let mut goals =
        goals.ok_or_else(|| AppError::Validation("Goals object is missing in the request".to_string()))?;

    let text = extract_resume_text(&filename, content_type.as_deref(), &data)?;
    goals.resume_content = sanitize_resume_text(&text);

    request.goals = goals;
    request.has_resume = true;

    let roadmap = insert_roadmap(&state.db, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveRoadmapResponse {
            message: "Roadmap saved successfully with plain text resume content".to_string(),
            roadmap,
        }),
    ))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}
