//! Benefits normalization: flattens a `Benefits` record into display labels.

use crate::models::job::Benefits;

/// Hard cap on the summary line, in characters.
pub const SUMMARY_MAX_CHARS: usize = 50;
const TRUNCATED_CHARS: usize = SUMMARY_MAX_CHARS - ELLIPSIS.len();
const ELLIPSIS: &str = "...";

/// Known flags in display order.
const KNOWN_BENEFITS: [(&str, fn(&Benefits) -> bool); 5] = [
    ("Vale-transporte (VT)", |b| b.has_vt),
    ("Vale-refeição (VR)", |b| b.has_vr),
    ("Vale-alimentação (VA)", |b| b.has_va),
    ("Plano de saúde", |b| b.has_health_plan),
    ("Plano odontológico", |b| b.has_dental_plan),
];

/// Known flags that are set, in fixed order, then every non-blank "other"
/// entry (trimmed) in its original order.
pub fn benefit_labels(benefits: &Benefits) -> Vec<String> {
    KNOWN_BENEFITS
        .iter()
        .filter(|(_, is_set)| is_set(benefits))
        .map(|(label, _)| label.to_string())
        .chain(benefits.others.non_empty().map(str::to_string))
        .collect()
}

/// One-line summary for list views: the first `limit` labels joined by ", ",
/// "..." when labels were left out, and never longer than 50 characters.
pub fn benefits_summary(benefits: &Benefits, limit: usize) -> String {
    let labels = benefit_labels(benefits);

    let mut summary = labels
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if labels.len() > limit {
        summary.push_str(ELLIPSIS);
    }

    if summary.chars().count() > SUMMARY_MAX_CHARS {
        let mut truncated: String = summary.chars().take(TRUNCATED_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        return truncated;
    }
    summary
}
