//! Salary / day-rate display strings in Brazilian currency format.

use crate::models::job::{ContractType, Job, SalaryRange};

pub const CURRENCY_PREFIX: &str = "R$";
pub const NEGOTIABLE: &str = "negotiable";

/// Formats the compensation of a posting for display.
pub fn format_job_salary(job: &Job) -> String {
    format_compensation(job.contract_type, job.salary.as_ref(), job.daily_rate)
}

/// Rules, first match wins:
/// 1. freelancer → "R$ <rate> / day", or "negotiable" without a rate
/// 2. no bounds → "negotiable"
/// 3. min == max → single amount
/// 4. both bounds → "<min> - <max>"
/// 5. one bound → "from <min>" / "up to <max>"
///
/// NaN, infinite and negative amounts count as absent. A range with min > max
/// is printed as given.
pub fn format_compensation(
    contract_type: ContractType,
    salary: Option<&SalaryRange>,
    daily_rate: Option<f64>,
) -> String {
    if contract_type == ContractType::Freelancer {
        return match daily_rate.and_then(usable_amount) {
            Some(rate) => format!("{} / day", format_brl(rate)),
            None => NEGOTIABLE.to_string(),
        };
    }

    let (min, max) = match salary {
        Some(range) => (
            range.min.and_then(usable_amount),
            range.max.and_then(usable_amount),
        ),
        None => (None, None),
    };

    match (min, max) {
        (None, None) => NEGOTIABLE.to_string(),
        (Some(min), Some(max)) if min == max => format_brl(min),
        (Some(min), Some(max)) => format!("{} - {}", format_brl(min), format_brl(max)),
        (Some(min), None) => format!("from {}", format_brl(min)),
        (None, Some(max)) => format!("up to {}", format_brl(max)),
    }
}

/// `5000.0` → `"R$ 5.000"`. Rounded to whole reais, `.` as thousands separator.
pub fn format_brl(amount: f64) -> String {
    let digits = (amount.round() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{CURRENCY_PREFIX} {grouped}")
}

fn usable_amount(amount: f64) -> Option<f64> {
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}
