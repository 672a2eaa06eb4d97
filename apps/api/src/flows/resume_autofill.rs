//! Résumé auto-fill: raw résumé text in, structured candidate record out.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::flows::prompts::{FLOW_SYSTEM, RESUME_AUTOFILL_PROMPT_TEMPLATE};
use crate::flows::runner::{run_flow, FlowError, FlowOutput};
use crate::listings::validation::clean_terms;
use crate::llm_client::prompts::{LANGUAGE_INSTRUCTION, NO_INVENTION_INSTRUCTION};
use crate::llm_client::CompletionService;

/// Fields extracted from a résumé. Anything not found stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
}

impl FlowOutput for ResumeFields {}

impl ResumeFields {
    fn tidy(self) -> Self {
        ResumeFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            experience: clean_terms(&self.experience),
            skills: clean_terms(&self.skills),
            education: clean_terms(&self.education),
        }
    }
}

/// Extracts candidate fields from pasted résumé text.
/// Blank input yields an empty record without calling the service.
pub async fn autofill_resume(
    service: &dyn CompletionService,
    resume_text: &str,
) -> Result<ResumeFields, FlowError> {
    if resume_text.trim().is_empty() {
        info!("Résumé auto-fill skipped: empty text");
        return Ok(ResumeFields::default());
    }

    let prompt = RESUME_AUTOFILL_PROMPT_TEMPLATE
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{no_invention_instruction}", NO_INVENTION_INSTRUCTION)
        .replace("{resume_text}", resume_text.trim());

    let fields: ResumeFields = run_flow(service, "autofill_resume", &prompt, FLOW_SYSTEM).await?;
    Ok(fields.tidy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::runner::testing::FakeCompletion;

    #[tokio::test]
    async fn test_autofill_missing_fields_default_to_empty() {
        let fake = FakeCompletion::replying(
            r#"{"name": " João Pereira ", "skills": ["Solda", "solda", "Empilhadeira"]}"#,
        );
        let fields = autofill_resume(&fake, "João Pereira\nSoldador, operador de empilhadeira")
            .await
            .unwrap();
        assert_eq!(fields.name, "João Pereira");
        assert_eq!(fields.email, "");
        assert!(fields.experience.is_empty());
        assert_eq!(fields.skills, vec!["Solda", "Empilhadeira"]);
    }

    #[tokio::test]
    async fn test_autofill_empty_text_skips_service() {
        let fake = FakeCompletion::replying("{}");
        let fields = autofill_resume(&fake, "\n\n").await.unwrap();
        assert_eq!(fields, ResumeFields::default());
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_autofill_wrong_types_are_malformed() {
        let fake = FakeCompletion::replying(r#"{"name": "Ana", "skills": "Excel, Word"}"#);
        let err = autofill_resume(&fake, "Ana - Excel, Word").await.unwrap_err();
        assert!(matches!(err, FlowError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_autofill_non_json_reply_is_malformed() {
        let fake = FakeCompletion::replying("Desculpe, não consegui ler o currículo.");
        let err = autofill_resume(&fake, "texto").await.unwrap_err();
        assert!(matches!(err, FlowError::MalformedOutput(_)));
    }
}
