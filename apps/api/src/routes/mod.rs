pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::flows::handlers as ai;
use crate::listings::handlers as listings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route(
            "/api/v1/jobs",
            get(listings::handle_list_jobs).post(listings::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(listings::handle_get_job)
                .put(listings::handle_update_job)
                .delete(listings::handle_delete_job),
        )
        // Applications API
        .route(
            "/api/v1/jobs/:id/applications",
            get(listings::handle_list_job_applications).post(listings::handle_apply),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(listings::handle_update_application_status),
        )
        .route(
            "/api/v1/candidates/:id/applications",
            get(listings::handle_candidate_applications),
        )
        // AI assistant API
        .route("/api/v1/ai/skills", post(ai::handle_suggest_skills))
        .route(
            "/api/v1/ai/resume-autofill",
            post(ai::handle_resume_autofill),
        )
        .route(
            "/api/v1/ai/job-description",
            post(ai::handle_job_description),
        )
        .route(
            "/api/v1/ai/job-suggestions",
            post(ai::handle_job_suggestions),
        )
        .route(
            "/api/v1/ai/rank-candidates",
            post(ai::handle_rank_candidates),
        )
        .route(
            "/api/v1/ai/resume-builder",
            post(ai::handle_resume_builder),
        )
        .with_state(state)
}
