//! Write-side checks for employer and candidate payloads.
//!
//! Read paths tolerate bad stored data (see `salary` and `benefits`); these
//! checks keep new data clean instead.

use crate::errors::AppError;
use crate::models::application::ApplicationDraft;
use crate::models::job::JobDraft;

pub const MAX_OTHER_BENEFITS: usize = 5;

pub fn validate_job_draft(draft: &JobDraft) -> Result<(), AppError> {
    require_text("title", &draft.title)?;
    require_text("location", &draft.location)?;
    require_text("description", &draft.description)?;

    for (field, amount) in [
        ("salary_min", draft.salary_min),
        ("salary_max", draft.salary_max),
        ("daily_rate", draft.daily_rate),
    ] {
        if let Some(value) = amount {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Validation(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
    }

    if let (Some(min), Some(max)) = (draft.salary_min, draft.salary_max) {
        if min > max {
            return Err(AppError::Validation(
                "salary_min cannot be greater than salary_max".to_string(),
            ));
        }
    }

    if let Some(benefits) = &draft.benefits {
        let count = benefits.others.non_empty().count();
        if count > MAX_OTHER_BENEFITS {
            return Err(AppError::Validation(format!(
                "at most {MAX_OTHER_BENEFITS} other benefits are allowed, got {count}"
            )));
        }
    }

    Ok(())
}

pub fn validate_application_draft(draft: &ApplicationDraft) -> Result<(), AppError> {
    require_text("candidate_name", &draft.candidate_name)?;
    require_text("candidate_email", &draft.candidate_email)?;
    if !draft.candidate_email.contains('@') {
        return Err(AppError::Validation(
            "candidate_email must be an email address".to_string(),
        ));
    }
    Ok(())
}

/// Trims terms (keywords, skills) and drops blanks and case-insensitive repeats, keeping order.
pub fn clean_terms(keywords: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
        .map(String::from)
        .collect()
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{Benefits, ContractType};
    use uuid::Uuid;

    fn make_draft() -> JobDraft {
        JobDraft {
            employer_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Recepcionista".to_string(),
            location: "Bauru - SP".to_string(),
            contract_type: ContractType::Clt,
            salary_min: Some(1800.0),
            salary_max: Some(2200.0),
            daily_rate: None,
            description: "Atendimento e agenda".to_string(),
            keywords: vec![],
            contact: None,
            benefits: None,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_job_draft(&make_draft()).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut draft = make_draft();
        draft.title = "  ".to_string();
        assert!(matches!(
            validate_job_draft(&draft),
            Err(AppError::Validation(msg)) if msg.contains("title")
        ));
    }

    #[test]
    fn test_inverted_salary_rejected() {
        let mut draft = make_draft();
        draft.salary_min = Some(3000.0);
        assert!(matches!(
            validate_job_draft(&draft),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_or_nan_amount_rejected() {
        let mut draft = make_draft();
        draft.daily_rate = Some(-1.0);
        assert!(validate_job_draft(&draft).is_err());
        let mut draft = make_draft();
        draft.salary_max = Some(f64::NAN);
        assert!(validate_job_draft(&draft).is_err());
    }

    #[test]
    fn test_other_benefits_limit_counts_non_blank_only() {
        let mut draft = make_draft();
        let mut others: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        others.push("   ".to_string());
        draft.benefits = Some(Benefits {
            others: others.clone().into(),
            ..Default::default()
        });
        assert!(validate_job_draft(&draft).is_ok());

        others.push("f".to_string());
        draft.benefits = Some(Benefits {
            others: others.into(),
            ..Default::default()
        });
        assert!(validate_job_draft(&draft).is_err());
    }

    #[test]
    fn test_application_requires_email() {
        let draft = ApplicationDraft {
            candidate_id: Uuid::new_v4(),
            candidate_name: "Ana".to_string(),
            candidate_email: "ana.example.com".to_string(),
            candidate_phone: None,
            resume_url: None,
            cover_letter: None,
        };
        assert!(validate_application_draft(&draft).is_err());
    }

    #[test]
    fn test_clean_terms() {
        let raw = vec![
            " Rust ".to_string(),
            "".to_string(),
            "rust".to_string(),
            "SQL".to_string(),
        ];
        assert_eq!(clean_terms(&raw), vec!["Rust", "SQL"]);
    }
}
