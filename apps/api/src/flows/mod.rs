// AI flows: single-shot prompt adapters over the completion service.
// Every flow makes at most one call through `CompletionService` and never retries.

pub mod candidate_ranking;
pub mod handlers;
pub mod job_description;
pub mod job_matcher;
pub mod prompts;
pub mod resume_autofill;
pub mod resume_builder;
pub mod runner;
pub mod skills;

pub use runner::FlowError;
