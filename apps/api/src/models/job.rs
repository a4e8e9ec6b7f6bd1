use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub role: String,
    pub responsibilities: String,
    pub interview_rounds: i32,
    pub interview_process: String,
    pub shortlisted_candidates: i32,
    pub number_of_positions: i32,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub experience: String,
    pub education: String,
    pub status: String,
    pub skills: Vec<String>,
    pub remote: bool,
    pub deadline: Option<DateTime<Utc>>,
    pub threshold: i32,
    pub jd_summary: Option<String>,
    pub company_id: i32,
    pub hr_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    /// Whether the posting still takes applications at `now`.
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        let open = self.status.parse::<JobStatus>() == Ok(JobStatus::Open);
        open && self.deadline.map_or(true, |deadline| now <= deadline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(JobStatus::Open),
            "Closed" => Ok(JobStatus::Closed),
            other => Err(format!("unknown job status '{other}'")),
        }
    }
}

/// A posting with fixed text, for tests that only vary status and deadline.
#[cfg(test)]
pub fn sample_job(status: &str, deadline: Option<DateTime<Utc>>) -> JobRow {
    let now = Utc::now();
    JobRow {
        id: Uuid::new_v4(),
        title: "Backend Engineer".into(),
        description: "Build and run the hiring platform".into(),
        role: "Engineer".into(),
        responsibilities: "Own the API end to end".into(),
        interview_rounds: 3,
        interview_process: "Screen, system design, culture".into(),
        shortlisted_candidates: 0,
        number_of_positions: 2,
        location: "Pune".into(),
        job_type: "Full_time".into(),
        experience: "2-4 years".into(),
        education: "Bachelors_Degree".into(),
        status: status.into(),
        skills: vec!["Rust".into()],
        remote: true,
        deadline,
        threshold: 60,
        jd_summary: None,
        company_id: 1,
        hr_id: 1,
        created_at: now,
        updated_at: now,
    }
}
