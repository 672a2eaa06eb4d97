//! Axum route handlers for the AI assistant endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::candidate_ranking::{rank_candidates, CandidateProfile, RankedCandidate};
use crate::flows::job_description::generate_job_description;
use crate::flows::job_matcher::suggest_jobs;
use crate::flows::resume_autofill::{autofill_resume, ResumeFields};
use crate::flows::resume_builder::{continue_interview, BuilderResponse, ChatMessage};
use crate::flows::skills::suggest_skills;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    #[serde(default)]
    pub experience: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeAutofillRequest {
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub title: String,
    /// Comma-separated.
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct JobSuggestionsRequest {
    pub profile: String,
    #[serde(default)]
    pub job_descriptions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JobSuggestionsResponse {
    pub matches: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RankCandidatesRequest {
    pub job_description: String,
    #[serde(default)]
    pub candidates: Vec<CandidateProfile>,
}

#[derive(Debug, Serialize)]
pub struct RankCandidatesResponse {
    pub rankings: Vec<RankedCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeBuilderRequest {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Json(request): Json<SkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    let skills = suggest_skills(state.completion.as_ref(), &request.experience).await?;
    Ok(Json(SkillsResponse { skills }))
}

/// POST /api/v1/ai/resume-autofill
pub async fn handle_resume_autofill(
    State(state): State<AppState>,
    Json(request): Json<ResumeAutofillRequest>,
) -> Result<Json<ResumeFields>, AppError> {
    let fields = autofill_resume(state.completion.as_ref(), &request.resume_text).await?;
    Ok(Json(fields))
}

/// POST /api/v1/ai/job-description
pub async fn handle_job_description(
    State(state): State<AppState>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    let description =
        generate_job_description(state.completion.as_ref(), &request.title, &request.keywords)
            .await?;
    Ok(Json(JobDescriptionResponse { description }))
}

/// POST /api/v1/ai/job-suggestions
pub async fn handle_job_suggestions(
    State(state): State<AppState>,
    Json(request): Json<JobSuggestionsRequest>,
) -> Result<Json<JobSuggestionsResponse>, AppError> {
    let matches = suggest_jobs(
        state.completion.as_ref(),
        &request.profile,
        &request.job_descriptions,
    )
    .await?;
    Ok(Json(JobSuggestionsResponse { matches }))
}

/// POST /api/v1/ai/rank-candidates
///
/// Rankings come back highest score first, whatever order the model used.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Json(request): Json<RankCandidatesRequest>,
) -> Result<Json<RankCandidatesResponse>, AppError> {
    let rankings = rank_candidates(
        state.completion.as_ref(),
        &request.job_description,
        &request.candidates,
    )
    .await?;
    Ok(Json(RankCandidatesResponse { rankings }))
}

/// POST /api/v1/ai/resume-builder
///
/// Stateless: the client sends the whole conversation every turn.
pub async fn handle_resume_builder(
    State(state): State<AppState>,
    Json(request): Json<ResumeBuilderRequest>,
) -> Result<Json<BuilderResponse>, AppError> {
    let response = continue_interview(state.completion.as_ref(), &request.history).await?;
    Ok(Json(response))
}
