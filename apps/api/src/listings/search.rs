//! Free-text job filter. Plain case-insensitive substring containment, no scoring.

use serde::Deserialize;

use crate::models::job::Job;

/// Query-string parameters of `GET /api/v1/jobs`. Blank values disable a filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[cfg(test)]
impl SearchCriteria {
    pub fn new(q: &str, location: &str) -> Self {
        Self {
            q: Some(q.to_string()),
            location: Some(location.to_string()),
        }
    }
}

/// Returns the jobs matching `criteria`, preserving input order.
///
/// A job matches when the query occurs in its title, description, company name
/// or any keyword, and the location filter occurs in its location.
pub fn filter_jobs<'a>(jobs: &'a [Job], criteria: &SearchCriteria) -> Vec<&'a Job> {
    let query = normalized(criteria.q.as_deref());
    let location = normalized(criteria.location.as_deref());

    jobs.iter()
        .filter(|job| {
            query.as_deref().map_or(true, |q| matches_query(job, q))
                && location
                    .as_deref()
                    .map_or(true, |l| job.location.to_lowercase().contains(l))
        })
        .collect()
}

fn matches_query(job: &Job, query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query);

    contains(&job.title)
        || contains(&job.description)
        || job.company_name.as_deref().is_some_and(contains)
        || job.keywords.iter().any(|k| contains(k))
}

/// Lowercased, trimmed filter term, or `None` when blank.
fn normalized(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
