//! Conversational résumé builder.
//!
//! The caller owns the conversation and resubmits the whole history on every
//! turn. Each turn replays it to the model, which answers with the next question
//! and the profile as known so far. The fields still missing are computed
//! locally from that profile, in a fixed order.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::flows::prompts::{FLOW_SYSTEM, RESUME_BUILDER_PROMPT_TEMPLATE};
use crate::flows::runner::{run_flow, FlowError, FlowOutput};
use crate::listings::validation::clean_terms;
use crate::llm_client::prompts::LANGUAGE_INSTRUCTION;
use crate::llm_client::CompletionService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    #[serde(alias = "assistant")]
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
}

/// Profile fields in the order the interview collects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Summary,
    Experience,
    Education,
    Skills,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Summary,
        ProfileField::Experience,
        ProfileField::Education,
        ProfileField::Skills,
    ];

    fn is_filled(self, profile: &BuilderProfile) -> bool {
        let has_text = |s: &str| !s.trim().is_empty();
        let has_items = |items: &[String]| items.iter().any(|s| has_text(s));
        match self {
            ProfileField::Name => has_text(&profile.name),
            ProfileField::Email => has_text(&profile.email),
            ProfileField::Phone => has_text(&profile.phone),
            ProfileField::Summary => has_text(&profile.summary),
            ProfileField::Experience => has_items(&profile.experience),
            ProfileField::Education => has_items(&profile.education),
            ProfileField::Skills => has_items(&profile.skills),
        }
    }
}

impl BuilderProfile {
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| !f.is_filled(self))
            .collect()
    }

    pub fn next_missing_field(&self) -> Option<ProfileField> {
        ProfileField::ALL.into_iter().find(|f| !f.is_filled(self))
    }

    fn tidy(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.summary = self.summary.trim().to_string();
        self.experience = clean_terms(&self.experience);
        self.education = clean_terms(&self.education);
        self.skills = clean_terms(&self.skills);
        self
    }
}

#[derive(Debug, Deserialize)]
struct BuilderTurn {
    #[serde(default)]
    next_question: String,
    #[serde(default)]
    is_complete: bool,
    #[serde(default)]
    profile: BuilderProfile,
}

impl FlowOutput for BuilderTurn {
    fn validate(&self) -> Result<(), String> {
        if !self.is_complete && self.next_question.trim().is_empty() {
            return Err("next_question is empty but the interview is not complete".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuilderResponse {
    pub next_question: String,
    /// The model's own verdict. Not overridden by `missing_fields`.
    pub is_complete: bool,
    pub profile: BuilderProfile,
    pub missing_fields: Vec<ProfileField>,
}

/// Plays one interview turn over the full `history`.
/// An empty history opens the interview.
pub async fn continue_interview(
    service: &dyn CompletionService,
    history: &[ChatMessage],
) -> Result<BuilderResponse, FlowError> {
    let prompt = RESUME_BUILDER_PROMPT_TEMPLATE
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{transcript}", &render_transcript(history));

    let turn: BuilderTurn = run_flow(service, "resume_builder", &prompt, FLOW_SYSTEM).await?;
    let profile = turn.profile.tidy();
    let missing_fields = profile.missing_fields();

    info!(
        "Résumé builder turn {}: complete={}, {} fields missing (next: {:?})",
        history.len(),
        turn.is_complete,
        missing_fields.len(),
        profile.next_missing_field()
    );

    Ok(BuilderResponse {
        next_question: turn.next_question.trim().to_string(),
        is_complete: turn.is_complete,
        profile,
        missing_fields,
    })
}

fn render_transcript(history: &[ChatMessage]) -> String {
    let lines: Vec<String> = history
        .iter()
        .filter(|m| !m.text.trim().is_empty())
        .map(|m| {
            let speaker = match m.role {
                ChatRole::User => "CANDIDATE",
                ChatRole::Model => "INTERVIEWER",
            };
            format!("{speaker}: {}", m.text.trim())
        })
        .collect();

    if lines.is_empty() {
        "(no messages yet, start the interview)".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::runner::testing::FakeCompletion;

    fn msg(role: ChatRole, text: &str) -> ChatMessage {
        ChatMessage {
            role,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_missing_fields_follow_fixed_order() {
        let profile = BuilderProfile {
            name: "Maria".to_string(),
            phone: "(16) 99999-0000".to_string(),
            skills: vec!["Vendas".to_string()],
            ..Default::default()
        };
        assert_eq!(
            profile.missing_fields(),
            vec![
                ProfileField::Email,
                ProfileField::Summary,
                ProfileField::Experience,
                ProfileField::Education,
            ]
        );
        assert_eq!(profile.next_missing_field(), Some(ProfileField::Email));
    }

    #[test]
    fn test_blank_entries_do_not_count_as_filled() {
        let profile = BuilderProfile {
            name: "  ".to_string(),
            experience: vec![" ".to_string()],
            ..Default::default()
        };
        assert_eq!(profile.missing_fields(), ProfileField::ALL.to_vec());
    }

    #[test]
    fn test_transcript_labels_speakers_and_skips_blank_messages() {
        let history = vec![
            msg(ChatRole::Model, "Qual é o seu nome?"),
            msg(ChatRole::User, "  "),
            msg(ChatRole::User, "Maria da Silva"),
        ];
        assert_eq!(
            render_transcript(&history),
            "INTERVIEWER: Qual é o seu nome?\nCANDIDATE: Maria da Silva"
        );
    }

    #[test]
    fn test_chat_role_accepts_assistant_alias() {
        let m: ChatMessage = serde_json::from_str(r#"{"role": "assistant", "text": "Oi"}"#).unwrap();
        assert_eq!(m.role, ChatRole::Model);
    }

    #[tokio::test]
    async fn test_turn_replays_history_and_reports_missing_fields() {
        let fake = FakeCompletion::replying(
            r#"{
                "next_question": "Qual é o seu e-mail?",
                "is_complete": false,
                "profile": {"name": " Maria da Silva "}
            }"#,
        );
        let history = vec![
            msg(ChatRole::Model, "Qual é o seu nome?"),
            msg(ChatRole::User, "Maria da Silva"),
        ];
        let response = continue_interview(&fake, &history).await.unwrap();

        assert_eq!(response.next_question, "Qual é o seu e-mail?");
        assert!(!response.is_complete);
        assert_eq!(response.profile.name, "Maria da Silva");
        assert_eq!(response.missing_fields.first(), Some(&ProfileField::Email));
        assert_eq!(response.missing_fields.len(), 6);
        assert!(fake.last_prompt().contains("CANDIDATE: Maria da Silva"));
    }

    #[tokio::test]
    async fn test_empty_history_opens_interview() {
        let fake = FakeCompletion::replying(
            r#"{"next_question": "Olá! Qual é o seu nome completo?", "is_complete": false, "profile": {}}"#,
        );
        let response = continue_interview(&fake, &[]).await.unwrap();
        assert_eq!(response.missing_fields, ProfileField::ALL.to_vec());
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_model_completion_flag_is_not_overridden() {
        let fake = FakeCompletion::replying(
            r#"{"next_question": "Obrigado!", "is_complete": true, "profile": {"name": "Maria"}}"#,
        );
        let response = continue_interview(&fake, &[msg(ChatRole::User, "Maria")])
            .await
            .unwrap();
        assert!(response.is_complete);
        assert!(!response.missing_fields.is_empty());
    }

    #[tokio::test]
    async fn test_missing_question_on_incomplete_turn_is_malformed() {
        let fake = FakeCompletion::replying(r#"{"next_question": "", "is_complete": false}"#);
        let err = continue_interview(&fake, &[]).await.unwrap_err();
        assert!(matches!(err, FlowError::MalformedOutput(_)));
    }

    #[test]
    fn test_response_serializes_missing_fields_as_snake_case() {
        let response = BuilderResponse {
            next_question: "?".to_string(),
            is_complete: false,
            profile: BuilderProfile::default(),
            missing_fields: vec![ProfileField::Email, ProfileField::Skills],
        };
        let v = serde_json::to_value(&response).unwrap();
        assert_eq!(v["missing_fields"], serde_json::json!(["email", "skills"]));
    }
}
