//! Job description assistant: title and keywords in, posting text out.

use serde::Deserialize;

use crate::flows::prompts::{FLOW_SYSTEM, JOB_DESCRIPTION_PROMPT_TEMPLATE};
use crate::flows::runner::{run_flow, FlowError, FlowOutput};
use crate::llm_client::prompts::LANGUAGE_INSTRUCTION;
use crate::llm_client::CompletionService;

#[derive(Debug, Deserialize)]
struct GeneratedDescription {
    description: String,
}

impl FlowOutput for GeneratedDescription {}

/// Splits "vendas, caixa , ,estoque" into `["vendas", "caixa", "estoque"]`.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Drafts a posting description. The title is required; keywords are optional.
pub async fn generate_job_description(
    service: &dyn CompletionService,
    title: &str,
    keywords: &str,
) -> Result<String, FlowError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(FlowError::EmptyInput("job title is required".to_string()));
    }

    let keywords = split_keywords(keywords);
    let keywords = if keywords.is_empty() {
        "(none)".to_string()
    } else {
        keywords.join(", ")
    };

    let prompt = JOB_DESCRIPTION_PROMPT_TEMPLATE
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{title}", title)
        .replace("{keywords}", &keywords);

    let output: GeneratedDescription =
        run_flow(service, "generate_job_description", &prompt, FLOW_SYSTEM).await?;

    let description = output.description.trim();
    if description.is_empty() {
        return Err(FlowError::UpstreamUnusable(
            "generate_job_description: empty description".to_string(),
        ));
    }
    Ok(description.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::runner::testing::FakeCompletion;

    #[test]
    fn test_split_keywords() {
        assert_eq!(
            split_keywords("vendas, caixa , ,estoque"),
            vec!["vendas", "caixa", "estoque"]
        );
        assert!(split_keywords(" , ").is_empty());
    }

    #[tokio::test]
    async fn test_generate_description_fills_prompt() {
        let fake = FakeCompletion::replying(r#"{"description": "  Buscamos repositor...  "}"#);
        let text = generate_job_description(&fake, "Repositor", "estoque, organização")
            .await
            .unwrap();
        assert_eq!(text, "Buscamos repositor...");
        let prompt = fake.last_prompt();
        assert!(prompt.contains("JOB TITLE: Repositor"));
        assert!(prompt.contains("KEYWORDS: estoque, organização"));
    }

    #[tokio::test]
    async fn test_empty_title_is_empty_input() {
        let fake = FakeCompletion::replying(r#"{"description": "x"}"#);
        let err = generate_job_description(&fake, " ", "vendas").await.unwrap_err();
        assert!(matches!(err, FlowError::EmptyInput(_)));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_description_is_unusable() {
        let fake = FakeCompletion::replying(r#"{"description": "   "}"#);
        let err = generate_job_description(&fake, "Garçom", "").await.unwrap_err();
        assert!(matches!(err, FlowError::UpstreamUnusable(_)));
    }
}
