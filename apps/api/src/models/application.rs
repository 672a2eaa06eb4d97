use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Where an application stands from the employer's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    UnderReview,
    Viewed,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Viewed => "viewed",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
    /// Opaque reference to an already-uploaded résumé file.
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/jobs/:id/applications`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationDraft {
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
}
