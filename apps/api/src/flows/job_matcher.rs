//! Job suggestion matcher: which of these postings suit this candidate?
//!
//! Selection and order come from the model. Locally we only make sure the
//! answer is a subset of what was offered.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{info, warn};

use crate::flows::prompts::{FLOW_SYSTEM, JOB_MATCH_PROMPT_TEMPLATE};
use crate::flows::runner::{run_flow, FlowError, FlowOutput};
use crate::llm_client::CompletionService;

#[derive(Debug, Deserialize)]
struct JobMatches {
    matches: Vec<String>,
}

impl FlowOutput for JobMatches {}

/// Returns the subset of `job_descriptions` the model judged relevant to
/// `profile`, in the model's order. No descriptions → empty list, no call.
pub async fn suggest_jobs(
    service: &dyn CompletionService,
    profile: &str,
    job_descriptions: &[String],
) -> Result<Vec<String>, FlowError> {
    if job_descriptions.is_empty() {
        info!("Job suggestion skipped: no job descriptions supplied");
        return Ok(Vec::new());
    }
    if profile.trim().is_empty() {
        return Err(FlowError::EmptyInput(
            "candidate profile is required".to_string(),
        ));
    }

    let jobs_json = format!("{:#}", serde_json::Value::from(job_descriptions.to_vec()));
    let prompt = JOB_MATCH_PROMPT_TEMPLATE
        .replace("{profile}", profile.trim())
        .replace("{jobs_json}", &jobs_json);

    let output: JobMatches = run_flow(service, "suggest_jobs", &prompt, FLOW_SYSTEM).await?;
    Ok(keep_offered(output.matches, job_descriptions))
}

/// Maps each returned string back to the offered description it names,
/// dropping strangers and repeats.
fn keep_offered(matches: Vec<String>, offered: &[String]) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut kept = Vec::with_capacity(matches.len());

    for candidate in matches {
        let wanted = candidate.trim();
        match offered.iter().position(|o| o.trim() == wanted) {
            Some(idx) if taken.insert(idx) => kept.push(offered[idx].clone()),
            Some(_) => {}
            None => warn!(
                "suggest_jobs: dropping match not among offered jobs: {:?}",
                wanted.chars().take(60).collect::<String>()
            ),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::runner::testing::FakeCompletion;

    fn offered() -> Vec<String> {
        vec![
            "Garçom para eventos aos fins de semana".to_string(),
            "Desenvolvedor backend Rust".to_string(),
            "Auxiliar de cozinha".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_suggest_jobs_keeps_model_order_and_offered_text() {
        let fake = FakeCompletion::replying(
            r#"{"matches": ["Auxiliar de cozinha", " Garçom para eventos aos fins de semana "]}"#,
        );
        let out = suggest_jobs(&fake, "Experiência em restaurantes", &offered())
            .await
            .unwrap();
        assert_eq!(
            out,
            vec![
                "Auxiliar de cozinha".to_string(),
                "Garçom para eventos aos fins de semana".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_suggest_jobs_drops_unknown_and_repeated_matches() {
        let fake = FakeCompletion::replying(
            r#"{"matches": ["Motorista", "Auxiliar de cozinha", "Auxiliar de cozinha"]}"#,
        );
        let out = suggest_jobs(&fake, "cozinha", &offered()).await.unwrap();
        assert_eq!(out, vec!["Auxiliar de cozinha".to_string()]);
    }

    #[tokio::test]
    async fn test_suggest_jobs_without_jobs_skips_service() {
        let fake = FakeCompletion::replying(r#"{"matches": []}"#);
        let out = suggest_jobs(&fake, "qualquer perfil", &[]).await.unwrap();
        assert!(out.is_empty());
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_suggest_jobs_blank_profile_is_empty_input() {
        let fake = FakeCompletion::replying(r#"{"matches": []}"#);
        let err = suggest_jobs(&fake, "  ", &offered()).await.unwrap_err();
        assert!(matches!(err, FlowError::EmptyInput(_)));
        assert_eq!(fake.calls(), 0);
    }
}
