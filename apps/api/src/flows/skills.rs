//! Skill suggestion: free-text experience in, ordered skill labels out.

use serde::Deserialize;
use tracing::info;

use crate::flows::prompts::{FLOW_SYSTEM, SKILLS_PROMPT_TEMPLATE};
use crate::flows::runner::{run_flow, FlowError, FlowOutput};
use crate::listings::validation::clean_terms;
use crate::llm_client::prompts::LANGUAGE_INSTRUCTION;
use crate::llm_client::CompletionService;

#[derive(Debug, Deserialize)]
struct SkillSuggestions {
    skills: Vec<String>,
}

impl FlowOutput for SkillSuggestions {}

/// Suggests skills for an experience description, most evident first.
/// Blank input yields an empty list without calling the service.
pub async fn suggest_skills(
    service: &dyn CompletionService,
    experience: &str,
) -> Result<Vec<String>, FlowError> {
    if experience.trim().is_empty() {
        info!("Skill suggestion skipped: empty experience text");
        return Ok(Vec::new());
    }

    let prompt = SKILLS_PROMPT_TEMPLATE
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{experience}", experience.trim());

    let output: SkillSuggestions = run_flow(service, "suggest_skills", &prompt, FLOW_SYSTEM).await?;
    Ok(clean_terms(&output.skills))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::runner::testing::FakeCompletion;

    #[tokio::test]
    async fn test_suggest_skills_cleans_model_output() {
        let fake = FakeCompletion::replying(
            r#"{"skills": ["Atendimento ao cliente", " caixa ", "", "Caixa", "Excel"]}"#,
        );
        let skills = suggest_skills(&fake, "Trabalhei 3 anos como operadora de caixa")
            .await
            .unwrap();
        assert_eq!(skills, vec!["Atendimento ao cliente", "caixa", "Excel"]);
        assert!(fake.last_prompt().contains("operadora de caixa"));
    }

    #[tokio::test]
    async fn test_suggest_skills_empty_input_skips_service() {
        let fake = FakeCompletion::replying(r#"{"skills": ["x"]}"#);
        let skills = suggest_skills(&fake, "   ").await.unwrap();
        assert!(skills.is_empty());
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_suggest_skills_missing_field_is_malformed() {
        let fake = FakeCompletion::replying(r#"{"suggestions": ["Excel"]}"#);
        let err = suggest_skills(&fake, "planilhas").await.unwrap_err();
        assert!(matches!(err, FlowError::MalformedOutput(_)));
    }
}
