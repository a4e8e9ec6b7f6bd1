use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume: String,
    pub cover_letter: Option<String>,
    pub experience: Value,
    pub education: Value,
    pub projects: Value,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
    pub portfolio: Option<String>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub skills: Vec<String>,
    pub status: String,
    pub ai_analysis: Option<Value>,
    pub ai_mail_response: Option<Value>,
    pub job_id: Uuid,
    pub hr_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn current_status(&self) -> Result<CandidateStatus, String> {
        self.status.parse()
    }

    /// The email drafted by the screening service, if it sent one.
    pub fn ai_mail(&self) -> Option<AiMailResponse> {
        self.ai_mail_response
            .clone()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// A string field of the stored AI analysis, e.g. `ai_selection_email`.
    pub fn ai_analysis_field(&self, key: &str) -> Option<String> {
        self.ai_analysis
            .as_ref()
            .and_then(|a| a.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

/// Shape of the `aiMailResponse` JSON written by the screening service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiMailResponse {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Fields returned to the applicant right after applying.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReceipt {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    Applied,
    #[serde(rename = "shortlisted")]
    Shortlisted,
    #[serde(rename = "rejected")]
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Applied => "Applied",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(CandidateStatus::Applied),
            "shortlisted" => Ok(CandidateStatus::Shortlisted),
            "rejected" => Ok(CandidateStatus::Rejected),
            other => Err(format!("unknown candidate status '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_strings_match_stored_values() {
        for status in [
            CandidateStatus::Applied,
            CandidateStatus::Shortlisted,
            CandidateStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<CandidateStatus>(), Ok(status));
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.as_str())
            );
        }
    }

    #[test]
    fn test_ai_mail_tolerates_missing_fields() {
        let mail: AiMailResponse =
            serde_json::from_value(json!({ "subject": "Interview", "body": "Hi" })).unwrap();
        assert_eq!(mail.to, "");
        assert_eq!(mail.company_name, None);
    }
}
