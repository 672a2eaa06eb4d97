use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

/// Employment regime of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "CLT", alias = "clt")]
    Clt,
    #[serde(rename = "PJ", alias = "pj")]
    Pj,
    /// Day-rate work ("extra"). Priced per day instead of by monthly salary.
    #[serde(rename = "Freelancer", alias = "freelancer", alias = "extra")]
    Freelancer,
    #[serde(rename = "Internship", alias = "internship", alias = "Estágio")]
    Internship,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Clt => "CLT",
            ContractType::Pj => "PJ",
            ContractType::Freelancer => "Freelancer",
            ContractType::Internship => "Internship",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clt" => Some(ContractType::Clt),
            "pj" => Some(ContractType::Pj),
            "freelancer" | "extra" => Some(ContractType::Freelancer),
            "internship" | "estágio" => Some(ContractType::Internship),
            _ => None,
        }
    }
}

/// Monthly salary bounds. Either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
}

/// Perks attached to a posting: five well-known flags plus free-text extras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Benefits {
    #[serde(default, alias = "hasVT")]
    pub has_vt: bool,
    #[serde(default, alias = "hasVR")]
    pub has_vr: bool,
    #[serde(default, alias = "hasVA")]
    pub has_va: bool,
    #[serde(default, alias = "hasHealthPlan")]
    pub has_health_plan: bool,
    #[serde(default, alias = "hasDentalPlan")]
    pub has_dental_plan: bool,
    #[serde(default)]
    pub others: OtherBenefits,
}

/// Free-text benefit entries, always held as an ordered list.
///
/// Older records store these as a keyed object (`{"0": "Gympass", "2": "PLR"}`);
/// deserialization accepts both shapes and keeps map values in document order.
/// Non-string values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OtherBenefits(pub Vec<String>);

impl OtherBenefits {
    /// Entries that are non-empty after trimming, in order.
    pub fn non_empty(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
    }
}

impl From<Vec<String>> for OtherBenefits {
    fn from(items: Vec<String>) -> Self {
        OtherBenefits(items)
    }
}

impl<'de> Deserialize<'de> for OtherBenefits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OtherBenefitsVisitor)
    }
}

struct OtherBenefitsVisitor;

impl<'de> Visitor<'de> for OtherBenefitsVisitor {
    type Value = OtherBenefits;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list or a keyed map of benefit strings")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OtherBenefits::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OtherBenefits::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::new();
        while let Some(value) = seq.next_element::<Value>()? {
            if let Value::String(s) = value {
                items.push(s);
            }
        }
        Ok(OtherBenefits(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::new();
        while let Some((_, value)) = map.next_entry::<IgnoredAny, Value>()? {
            if let Value::String(s) = value {
                items.push(s);
            }
        }
        Ok(OtherBenefits(items))
    }
}

/// Raw `jobs` row joined with the owning company's name.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub company_id: Uuid,
    pub company_name: Option<String>,
    pub title: String,
    pub location: String,
    pub contract_type: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub daily_rate: Option<f64>,
    pub description: String,
    pub keywords: Vec<String>,
    pub contact: Option<Value>,
    pub benefits: Option<Value>,
    pub posted_at: DateTime<Utc>,
}

/// A job posting as the rest of the service sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub company_id: Uuid,
    pub company_name: Option<String>,
    pub title: String,
    pub location: String,
    pub contract_type: ContractType,
    pub salary: Option<SalaryRange>,
    pub daily_rate: Option<f64>,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub contact: Option<ContactInfo>,
    pub benefits: Option<Benefits>,
    pub posted_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = anyhow::Error;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let contract_type = ContractType::parse(&row.contract_type).ok_or_else(|| {
            anyhow::anyhow!(
                "job {} has unknown contract type '{}'",
                row.id,
                row.contract_type
            )
        })?;

        let salary = match (row.salary_min, row.salary_max) {
            (None, None) => None,
            (min, max) => Some(SalaryRange { min, max }),
        };

        // Stored JSON that no longer matches the shape degrades to "absent".
        let benefits = row.benefits.and_then(|v| {
            serde_json::from_value::<Benefits>(v)
                .map_err(|e| warn!("job {}: ignoring unreadable benefits: {e}", row.id))
                .ok()
        });
        let contact = row.contact.and_then(|v| {
            serde_json::from_value::<ContactInfo>(v)
                .map_err(|e| warn!("job {}: ignoring unreadable contact: {e}", row.id))
                .ok()
        });

        Ok(Job {
            id: row.id,
            employer_id: row.employer_id,
            company_id: row.company_id,
            company_name: row.company_name,
            title: row.title,
            location: row.location,
            contract_type,
            salary,
            daily_rate: row.daily_rate,
            description: row.description,
            keywords: row.keywords,
            contact,
            benefits,
            posted_at: row.posted_at,
        })
    }
}

/// Create/update payload sent by an employer.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDraft {
    pub employer_id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub location: String,
    pub contract_type: ContractType,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub daily_rate: Option<f64>,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub contact: Option<ContactInfo>,
    pub benefits: Option<Benefits>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_row() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            company_name: Some("Padaria Central".to_string()),
            title: "Atendente".to_string(),
            location: "Campinas - SP".to_string(),
            contract_type: "CLT".to_string(),
            salary_min: Some(2000.0),
            salary_max: None,
            daily_rate: None,
            description: "Atendimento ao cliente".to_string(),
            keywords: vec!["varejo".to_string()],
            contact: None,
            benefits: None,
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn test_contract_type_accepts_display_and_lowercase_names() {
        let t: ContractType = serde_json::from_str(r#""CLT""#).unwrap();
        assert_eq!(t, ContractType::Clt);
        let t: ContractType = serde_json::from_str(r#""extra""#).unwrap();
        assert_eq!(t, ContractType::Freelancer);
        assert_eq!(ContractType::parse(" PJ "), Some(ContractType::Pj));
        assert_eq!(ContractType::parse("temporário"), None);
    }

    #[test]
    fn test_contract_type_as_str_round_trips_through_parse() {
        for t in [
            ContractType::Clt,
            ContractType::Pj,
            ContractType::Freelancer,
            ContractType::Internship,
        ] {
            assert_eq!(ContractType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_other_benefits_from_list() {
        let b: Benefits = serde_json::from_value(json!({
            "has_vt": true,
            "others": ["Gympass", "", "PLR"]
        }))
        .unwrap();
        assert!(b.has_vt);
        assert_eq!(b.others.0, vec!["Gympass", "", "PLR"]);
        assert_eq!(b.others.non_empty().collect::<Vec<_>>(), vec!["Gympass", "PLR"]);
    }

    #[test]
    fn test_other_benefits_from_sparse_map_keeps_document_order() {
        let b: Benefits =
            serde_json::from_str(r#"{"hasVR": true, "others": {"3": "PLR", "0": "Gympass"}}"#)
                .unwrap();
        assert!(b.has_vr);
        assert_eq!(b.others.0, vec!["PLR", "Gympass"]);
    }

    #[test]
    fn test_other_benefits_null_and_non_strings() {
        let b: Benefits = serde_json::from_str(r#"{"others": null}"#).unwrap();
        assert!(b.others.0.is_empty());
        let b: Benefits = serde_json::from_str(r#"{"others": ["Gympass", 3, null]}"#).unwrap();
        assert_eq!(b.others.0, vec!["Gympass"]);
    }

    #[test]
    fn test_other_benefits_serializes_as_list() {
        let b = Benefits {
            others: vec!["Gympass".to_string()].into(),
            ..Default::default()
        };
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(v["others"], json!(["Gympass"]));
    }

    #[test]
    fn test_job_from_row_builds_salary_and_benefits() {
        let mut row = make_row();
        row.benefits = Some(json!({"has_va": true, "others": ["Seguro de vida"]}));
        let job = Job::try_from(row).unwrap();
        assert_eq!(job.contract_type, ContractType::Clt);
        assert_eq!(
            job.salary,
            Some(SalaryRange {
                min: Some(2000.0),
                max: None
            })
        );
        assert!(job.benefits.unwrap().has_va);
    }

    #[test]
    fn test_job_from_row_without_amounts_has_no_salary() {
        let mut row = make_row();
        row.salary_min = None;
        assert!(Job::try_from(row).unwrap().salary.is_none());
    }

    #[test]
    fn test_job_from_row_tolerates_unreadable_benefits() {
        let mut row = make_row();
        row.benefits = Some(json!("not an object"));
        let job = Job::try_from(row).unwrap();
        assert!(job.benefits.is_none());
    }

    #[test]
    fn test_job_from_row_rejects_unknown_contract_type() {
        let mut row = make_row();
        row.contract_type = "temporário".to_string();
        assert!(Job::try_from(row).is_err());
    }
}
