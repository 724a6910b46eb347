//! Persistence gateway: sanitizes resume text and writes roadmap documents
//! as insert-only records.

pub mod handlers;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::roadmap::RoadmapRow;
use crate::roadmap::schema::Goals;

/// One display step of a persisted roadmap snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub step_title: String,
    #[serde(default)]
    pub step_description: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRoadmapRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub has_resume: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Strips resume text down to printable ASCII plus newline before storage.
/// PDF extractors leak ligatures, soft hyphens and control characters; the
/// stored document keeps only the allow-listed range.
pub fn sanitize_resume_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| matches!(c, ' '..='~' | '\n'))
        .collect()
}

/// Inserts a new roadmap document. The resume text inside `goals` is
/// sanitized here so no unsanitized snapshot ever reaches the store.
pub async fn insert_roadmap(
    pool: &PgPool,
    mut request: SaveRoadmapRequest,
) -> Result<RoadmapRow, AppError> {
    request.goals.resume_content = sanitize_resume_text(&request.goals.resume_content);

    let goals = serde_json::to_value(&request.goals).map_err(anyhow::Error::from)?;
    let steps = serde_json::to_value(&request.steps).map_err(anyhow::Error::from)?;

    let row: RoadmapRow = sqlx::query_as(
        r#"
        INSERT INTO roadmaps (id, title, description, skills, goals, has_resume, steps, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.title)
    .bind(&request.description)
    .bind(&request.skills)
    .bind(&goals)
    .bind(request.has_resume)
    .bind(&steps)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Extracts plain text from an uploaded resume: PDF files go through the
/// text extractor, anything else is treated as UTF-8.
pub fn extract_resume_text(
    filename: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, AppError> {
    let is_pdf = content_type == Some("application/pdf")
        || filename.to_lowercase().ends_with(".pdf");

    if is_pdf {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Validation(format!("Could not extract text from PDF resume: {e}")))
    } else {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_non_printable_characters() {
        let raw = "John\u{00A0}Doe\u{2014}Engineer\u{0000}\nRust \u{1F980} developer\tdone";
        let clean = sanitize_resume_text(raw);

        assert_eq!(clean, "JohnDoeEngineer\nRust  developerdone");
        assert!(clean.chars().all(|c| c == '\n' || (' '..='~').contains(&c)));
    }

    #[test]
    fn sanitize_keeps_plain_ascii_untouched() {
        let raw = "Senior Engineer (2019-2024): shipped v2.0!\nSkills: Rust, SQL";
        assert_eq!(sanitize_resume_text(raw), raw);
    }

    #[test]
    fn non_pdf_upload_is_read_as_utf8() {
        let text = extract_resume_text("resume.txt", Some("text/plain"), b"plain resume").unwrap();
        assert_eq!(text, "plain resume");
    }
}
