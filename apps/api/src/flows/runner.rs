//! Shared call-parse-validate step for every AI flow.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::{strip_json_fences, CompletionService};

#[derive(Debug, Error)]
pub enum FlowError {
    /// Input with no neutral result. Raised before any upstream call.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Transport failure, API error, or no content at all.
    #[error("upstream returned no usable result: {0}")]
    UpstreamUnusable(String),

    /// Content that does not match the flow's output schema.
    #[error("upstream output failed validation: {0}")]
    MalformedOutput(String),
}

/// Output schema of a flow. `validate` runs after deserialization and covers
/// constraints serde cannot express (ranges, non-empty strings).
pub trait FlowOutput: DeserializeOwned {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Makes exactly one completion call and turns the reply into `T`.
pub async fn run_flow<T: FlowOutput>(
    service: &dyn CompletionService,
    flow: &str,
    prompt: &str,
    system: &str,
) -> Result<T, FlowError> {
    let text = service.complete(prompt, system).await.map_err(|e| {
        warn!("{flow}: completion call failed: {e}");
        FlowError::UpstreamUnusable(format!("{flow}: {e}"))
    })?;

    let json = strip_json_fences(&text);
    if json.is_empty() {
        return Err(FlowError::UpstreamUnusable(format!("{flow}: empty reply")));
    }

    let output: T = serde_json::from_str(json).map_err(|e| {
        warn!("{flow}: reply is not valid output JSON: {e}");
        FlowError::MalformedOutput(format!("{flow}: {e}"))
    })?;

    output.validate().map_err(|reason| {
        warn!("{flow}: reply failed validation: {reason}");
        FlowError::MalformedOutput(format!("{flow}: {reason}"))
    })?;

    debug!("{flow}: reply accepted ({} bytes)", json.len());
    Ok(output)
}
