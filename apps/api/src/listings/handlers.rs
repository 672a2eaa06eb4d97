//! Axum route handlers for the Jobs and Applications API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::listings::benefits::{benefit_labels, benefits_summary};
use crate::listings::repository;
use crate::listings::salary::format_job_salary;
use crate::listings::search::{filter_jobs, SearchCriteria};
use crate::listings::validation::{validate_application_draft, validate_job_draft};
use crate::models::application::{ApplicationDraft, ApplicationRow, ApplicationStatus};
use crate::models::job::{Job, JobDraft};
use crate::state::AppState;

/// How many benefit labels a list card shows before "...".
const CARD_BENEFITS_LIMIT: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// A job plus its display strings.
#[derive(Debug, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub salary_display: String,
    pub benefit_labels: Vec<String>,
    pub benefits_summary: String,
}

impl From<Job> for JobView {
    fn from(job: Job) -> Self {
        let (labels, summary) = match &job.benefits {
            Some(b) => (benefit_labels(b), benefits_summary(b, CARD_BENEFITS_LIMIT)),
            None => (Vec::new(), String::new()),
        };
        JobView {
            salary_display: format_job_salary(&job),
            benefit_labels: labels,
            benefits_summary: summary,
            job,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmployerQuery {
    pub employer_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub job_id: Uuid,
    pub applications_removed: u64,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub employer_id: Uuid,
    pub status: ApplicationStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs?q=&location=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(criteria): Query<SearchCriteria>,
) -> Result<Json<Vec<JobView>>, AppError> {
    let jobs = repository::list_jobs(&state.db).await?;
    let matched: Vec<JobView> = filter_jobs(&jobs, &criteria)
        .into_iter()
        .cloned()
        .map(JobView::from)
        .collect();

    debug!(
        "Job search q={:?} location={:?}: {} of {} jobs",
        criteria.q,
        criteria.location,
        matched.len(),
        jobs.len()
    );
    Ok(Json(matched))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobView>, AppError> {
    let job = repository::get_job(&state.db, job_id).await?;
    Ok(Json(job.into()))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<JobView>), AppError> {
    validate_job_draft(&draft)?;
    let job = repository::create_job(&state.db, &draft).await?;
    Ok((StatusCode::CREATED, Json(job.into())))
}

/// PUT /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(draft): Json<JobDraft>,
) -> Result<Json<JobView>, AppError> {
    validate_job_draft(&draft)?;
    let job = repository::update_job(&state.db, job_id, &draft).await?;
    Ok(Json(job.into()))
}

/// DELETE /api/v1/jobs/:id?employer_id=
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<EmployerQuery>,
) -> Result<Json<DeleteJobResponse>, AppError> {
    let applications_removed = repository::delete_job(&state.db, job_id, params.employer_id).await?;
    Ok(Json(DeleteJobResponse {
        job_id,
        applications_removed,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(draft): Json<ApplicationDraft>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    validate_application_draft(&draft)?;
    let application = repository::create_application(&state.db, job_id, &draft).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/jobs/:id/applications?employer_id=
pub async fn handle_list_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(params): Query<EmployerQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let applications =
        repository::list_applications_for_job(&state.db, job_id, params.employer_id).await?;
    Ok(Json(applications))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_application_status(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let application =
        repository::update_application_status(&state.db, application_id, req.employer_id, req.status)
            .await?;
    Ok(Json(application))
}

/// GET /api/v1/candidates/:id/applications
pub async fn handle_candidate_applications(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let applications = repository::list_applications_for_candidate(&state.db, candidate_id).await?;
    Ok(Json(applications))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::job::{Benefits, ContractType, SalaryRange};

    fn make_job() -> Job {
        Job {
            id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            company_name: Some("Mercado Bom Preço".to_string()),
            title: "Repositor".to_string(),
            location: "Marília - SP".to_string(),
            contract_type: ContractType::Clt,
            salary: Some(SalaryRange {
                min: Some(5000.0),
                max: Some(7000.0),
            }),
            daily_rate: None,
            description: "Reposição de mercadorias".to_string(),
            keywords: vec![],
            contact: None,
            benefits: Some(Benefits {
                has_vt: true,
                has_vr: true,
                others: vec!["PLR".to_string(), "Gympass".to_string()].into(),
                ..Default::default()
            }),
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn test_job_view_carries_display_strings() {
        let view = JobView::from(make_job());
        assert_eq!(view.salary_display, "R$ 5.000 - R$ 7.000");
        assert_eq!(view.benefit_labels.len(), 4);
        assert_eq!(
            view.benefits_summary,
            "Vale-transporte (VT), Vale-refeição (VR), PLR..."
        );
    }

    #[test]
    fn test_job_view_flattens_job_fields() {
        let view = JobView::from(make_job());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "Repositor");
        assert_eq!(json["contract_type"], "CLT");
        assert_eq!(json["salary_display"], "R$ 5.000 - R$ 7.000");
    }

    #[test]
    fn test_job_view_without_benefits() {
        let mut job = make_job();
        job.benefits = None;
        job.salary = None;
        let view = JobView::from(job);
        assert!(view.benefit_labels.is_empty());
        assert_eq!(view.benefits_summary, "");
        assert_eq!(view.salary_display, "negotiable");
    }

    #[test]
    fn test_status_update_request_parses() {
        let req: StatusUpdateRequest = serde_json::from_value(serde_json::json!({
            "employer_id": Uuid::new_v4(),
            "status": "viewed"
        }))
        .unwrap();
        assert_eq!(req.status, ApplicationStatus::Viewed);
    }
}
