//! Candidate ranking: scores applicants against a job description.
//!
//! The model assigns each candidate a 0–10 score and a justification. Its
//! ordering is not trusted: results are re-sorted locally, highest score first.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::flows::prompts::{FLOW_SYSTEM, RANKING_PROMPT_TEMPLATE};
use crate::flows::runner::{run_flow, FlowError, FlowOutput};
use crate::llm_client::prompts::LANGUAGE_INSTRUCTION;
use crate::llm_client::CompletionService;

pub const MIN_SCORE: f32 = 0.0;
pub const MAX_SCORE: f32 = 10.0;

/// What the employer knows about an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
}

/// A candidate annotated with the model's assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: CandidateProfile,
    pub score: f32,
    pub justification: String,
}

#[derive(Debug, Deserialize)]
struct CandidateScore {
    id: String,
    score: f32,
    #[serde(default)]
    justification: String,
}

#[derive(Debug, Deserialize)]
struct RankingOutput {
    rankings: Vec<CandidateScore>,
}

impl FlowOutput for RankingOutput {
    fn validate(&self) -> Result<(), String> {
        for entry in &self.rankings {
            if !entry.score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&entry.score) {
                return Err(format!(
                    "score {} for candidate '{}' is outside {MIN_SCORE}-{MAX_SCORE}",
                    entry.score, entry.id
                ));
            }
        }
        Ok(())
    }
}

/// Ranks `candidates` for `job_description`, highest score first.
///
/// - no candidates → empty list, no upstream call
/// - upstream returns no rankings → `UpstreamUnusable`
/// - a score outside 0–10 → `MalformedOutput`
/// - rankings for unknown ids are dropped; each candidate appears at most once
pub async fn rank_candidates(
    service: &dyn CompletionService,
    job_description: &str,
    candidates: &[CandidateProfile],
) -> Result<Vec<RankedCandidate>, FlowError> {
    if candidates.is_empty() {
        info!("Candidate ranking skipped: no candidates");
        return Ok(Vec::new());
    }
    if job_description.trim().is_empty() {
        return Err(FlowError::EmptyInput(
            "job description is required".to_string(),
        ));
    }

    let prompt = build_ranking_prompt(job_description, candidates);
    let output: RankingOutput = run_flow(service, "rank_candidates", &prompt, FLOW_SYSTEM).await?;

    if output.rankings.is_empty() {
        return Err(FlowError::UpstreamUnusable(
            "rank_candidates: no rankings returned".to_string(),
        ));
    }

    let mut ranked = attach_scores(candidates, output.rankings);
    if ranked.is_empty() {
        return Err(FlowError::UpstreamUnusable(
            "rank_candidates: no ranking matched a submitted candidate".to_string(),
        ));
    }

    sort_by_score_desc(&mut ranked);

    info!(
        "Ranked {} of {} candidates (top score {})",
        ranked.len(),
        candidates.len(),
        ranked[0].score
    );
    Ok(ranked)
}

/// Highest score first. Stable, so ties keep the order they arrived in.
pub fn sort_by_score_desc(ranked: &mut [RankedCandidate]) {
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
}

fn attach_scores(
    candidates: &[CandidateProfile],
    scores: Vec<CandidateScore>,
) -> Vec<RankedCandidate> {
    let by_id: HashMap<&str, &CandidateProfile> =
        candidates.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut seen = HashSet::new();

    scores
        .into_iter()
        .filter_map(|s| {
            let Some(candidate) = by_id.get(s.id.trim()) else {
                warn!("rank_candidates: dropping score for unknown candidate '{}'", s.id);
                return None;
            };
            if !seen.insert(candidate.id.clone()) {
                warn!("rank_candidates: duplicate score for candidate '{}'", s.id);
                return None;
            }
            Some(RankedCandidate {
                candidate: (*candidate).clone(),
                score: s.score,
                justification: s.justification.trim().to_string(),
            })
        })
        .collect()
}

fn build_ranking_prompt(job_description: &str, candidates: &[CandidateProfile]) -> String {
    let candidates_json = json!(candidates
        .iter()
        .map(|c| json!({
            "id": c.id,
            "name": c.name,
            "summary": c.summary,
            "experience": c.experience,
            "education": c.education,
        }))
        .collect::<Vec<_>>());

    RANKING_PROMPT_TEMPLATE
        .replace("{language_instruction}", LANGUAGE_INSTRUCTION)
        .replace("{job_description}", job_description.trim())
        .replace("{candidates_json}", &format!("{candidates_json:#}"))
}
