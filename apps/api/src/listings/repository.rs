//! PostgreSQL access for jobs, applications and companies.
//!
//! Every function takes the pool explicitly; nothing here holds global state.

use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::listings::validation::clean_terms;
use crate::models::application::{ApplicationDraft, ApplicationRow, ApplicationStatus};
use crate::models::company::CompanyRow;
use crate::models::job::{Job, JobDraft, JobRow};

const JOB_SELECT: &str = r#"
    SELECT j.id, j.employer_id, j.company_id, c.name AS company_name,
           j.title, j.location, j.contract_type,
           j.salary_min, j.salary_max, j.daily_rate,
           j.description, j.keywords, j.contact, j.benefits, j.posted_at
    FROM jobs j
    LEFT JOIN companies c ON c.id = j.company_id
"#;

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// All postings, newest first.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<Job>, AppError> {
    let rows = sqlx::query_as::<_, JobRow>(&format!("{JOB_SELECT} ORDER BY j.posted_at DESC"))
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| Job::try_from(row).map_err(AppError::Internal))
        .collect()
}

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<Job, AppError> {
    let row = sqlx::query_as::<_, JobRow>(&format!("{JOB_SELECT} WHERE j.id = $1"))
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    Ok(Job::try_from(row)?)
}

pub async fn get_company(pool: &PgPool, company_id: Uuid) -> Result<CompanyRow, AppError> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))
}

pub async fn create_job(pool: &PgPool, draft: &JobDraft) -> Result<Job, AppError> {
    let company = get_company(pool, draft.company_id).await?;
    let (contact, benefits) = json_columns(draft)?;

    let job_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO jobs
            (employer_id, company_id, title, location, contract_type,
             salary_min, salary_max, daily_rate, description, keywords, contact, benefits)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id
        "#,
    )
    .bind(draft.employer_id)
    .bind(company.id)
    .bind(draft.title.trim())
    .bind(draft.location.trim())
    .bind(draft.contract_type.as_str())
    .bind(draft.salary_min)
    .bind(draft.salary_max)
    .bind(draft.daily_rate)
    .bind(&draft.description)
    .bind(clean_terms(&draft.keywords))
    .bind(contact)
    .bind(benefits)
    .fetch_one(pool)
    .await?;

    info!(
        "Employer {} posted job {job_id} for company {}",
        draft.employer_id, company.name
    );

    get_job(pool, job_id).await
}

/// Replaces a posting's editable fields. Only the owning employer may do this.
pub async fn update_job(pool: &PgPool, job_id: Uuid, draft: &JobDraft) -> Result<Job, AppError> {
    let existing = get_job(pool, job_id).await?;
    if existing.employer_id != draft.employer_id {
        return Err(AppError::Forbidden);
    }
    let company = get_company(pool, draft.company_id).await?;
    let (contact, benefits) = json_columns(draft)?;

    sqlx::query(
        r#"
        UPDATE jobs
        SET company_id = $1, title = $2, location = $3, contract_type = $4,
            salary_min = $5, salary_max = $6, daily_rate = $7, description = $8,
            keywords = $9, contact = $10, benefits = $11, updated_at = NOW()
        WHERE id = $12
        "#,
    )
    .bind(company.id)
    .bind(draft.title.trim())
    .bind(draft.location.trim())
    .bind(draft.contract_type.as_str())
    .bind(draft.salary_min)
    .bind(draft.salary_max)
    .bind(draft.daily_rate)
    .bind(&draft.description)
    .bind(clean_terms(&draft.keywords))
    .bind(contact)
    .bind(benefits)
    .bind(job_id)
    .execute(pool)
    .await?;

    info!("Employer {} updated job {job_id}", draft.employer_id);

    get_job(pool, job_id).await
}

/// Deletes a posting and every application to it in one transaction.
/// Returns how many applications were removed.
pub async fn delete_job(pool: &PgPool, job_id: Uuid, employer_id: Uuid) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;

    let owner: Option<Uuid> =
        sqlx::query_scalar("SELECT employer_id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(job_id)
            .fetch_optional(&mut *tx)
            .await?;

    match owner {
        None => return Err(AppError::NotFound(format!("Job {job_id} not found"))),
        Some(owner) if owner != employer_id => return Err(AppError::Forbidden),
        Some(_) => {}
    }

    let removed = sqlx::query("DELETE FROM applications WHERE job_id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Employer {employer_id} deleted job {job_id} and {removed} applications");
    Ok(removed)
}

fn json_columns(draft: &JobDraft) -> Result<(Option<Value>, Option<Value>), AppError> {
    let contact = draft
        .contact
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize contact: {e}")))?;
    let benefits = draft
        .benefits
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize benefits: {e}")))?;
    Ok((contact, benefits))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

/// Records a candidate's application. A second application to the same job
/// by the same candidate is a conflict.
pub async fn create_application(
    pool: &PgPool,
    job_id: Uuid,
    draft: &ApplicationDraft,
) -> Result<ApplicationRow, AppError> {
    // 404 before 409: the job must exist
    get_job(pool, job_id).await?;

    let row = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications
            (job_id, candidate_id, candidate_name, candidate_email, candidate_phone,
             resume_url, cover_letter, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(draft.candidate_id)
    .bind(draft.candidate_name.trim())
    .bind(draft.candidate_email.trim())
    .bind(&draft.candidate_phone)
    .bind(&draft.resume_url)
    .bind(&draft.cover_letter)
    .bind(ApplicationStatus::UnderReview.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(format!(
            "Candidate {} already applied to job {job_id}",
            draft.candidate_id
        )),
        other => AppError::Database(other),
    })?;

    info!(
        "Candidate {} applied to job {job_id} (application {})",
        draft.candidate_id, row.id
    );
    Ok(row)
}

/// Applicants for a job, oldest first. Only the owning employer may list them.
pub async fn list_applications_for_job(
    pool: &PgPool,
    job_id: Uuid,
    employer_id: Uuid,
) -> Result<Vec<ApplicationRow>, AppError> {
    let job = get_job(pool, job_id).await?;
    if job.employer_id != employer_id {
        return Err(AppError::Forbidden);
    }

    Ok(sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE job_id = $1 ORDER BY applied_at ASC",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}

pub async fn list_applications_for_candidate(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<ApplicationRow>, AppError> {
    Ok(sqlx::query_as::<_, ApplicationRow>(
        "SELECT * FROM applications WHERE candidate_id = $1 ORDER BY applied_at DESC",
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await?)
}

/// Moves an application to `status`. Only the employer owning the job may do this.
pub async fn update_application_status(
    pool: &PgPool,
    application_id: Uuid,
    employer_id: Uuid,
    status: ApplicationStatus,
) -> Result<ApplicationRow, AppError> {
    let owner: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT j.employer_id
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE a.id = $1
        "#,
    )
    .bind(application_id)
    .fetch_optional(pool)
    .await?;

    match owner {
        None => {
            return Err(AppError::NotFound(format!(
                "Application {application_id} not found"
            )))
        }
        Some(owner) if owner != employer_id => return Err(AppError::Forbidden),
        Some(_) => {}
    }

    let row = sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status.as_str())
    .bind(application_id)
    .fetch_one(pool)
    .await?;

    info!(
        "Application {application_id} moved to {} by employer {employer_id}",
        status.as_str()
    );
    Ok(row)
}
