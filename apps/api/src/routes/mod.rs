pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::persistence::handlers as persistence;
use crate::roadmap::handlers as roadmap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route(
            "/api/gemini/generate-gemini",
            post(generation::handle_generate_plan),
        )
        .route("/api/gemini/normalize", post(generation::handle_normalize_plan))
        // Assessment API
        .route(
            "/api/assessment/grade",
            post(roadmap::handle_grade_assessment),
        )
        // Roadmap persistence API
        .route("/api/roadmap", post(persistence::handle_save_roadmap))
        .route("/api/roadmap/upload", post(persistence::handle_upload_resume))
        .with_state(state)
}
