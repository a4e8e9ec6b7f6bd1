use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::JobStatus;
use crate::models::vocabulary::{EDUCATION_LEVELS, JOB_TYPES, SKILLS};
use crate::validation::{non_empty, Validator};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub role: String,
    pub responsibilities: String,
    pub interview_rounds: i64,
    pub interview_process: String,
    pub shortlisted_candidates: Option<i64>,
    pub number_of_positions: Option<i64>,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub experience: String,
    pub education: String,
    pub status: Option<String>,
    pub skills: Vec<String>,
    pub remote: Option<bool>,
    pub deadline: Option<DateTime<Utc>>,
    pub threshold: i64,
    pub jd_summary: Option<String>,
}

/// A validated posting, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub role: String,
    pub responsibilities: String,
    pub interview_rounds: i32,
    pub interview_process: String,
    pub shortlisted_candidates: i32,
    pub number_of_positions: i32,
    pub location: String,
    pub job_type: String,
    pub experience: String,
    pub education: String,
    pub status: JobStatus,
    pub skills: Vec<String>,
    pub remote: bool,
    pub deadline: Option<DateTime<Utc>>,
    pub threshold: i32,
    pub jd_summary: Option<String>,
}

impl CreateJobRequest {
    pub fn validate(self) -> Result<NewJob, AppError> {
        let mut v = Validator::new();
        v.length("title", &self.title, 3, 100, "Title")
            .length("description", &self.description, 10, 5000, "Description")
            .length("role", &self.role, 3, 100, "Role")
            .length("responsibilities", &self.responsibilities, 10, 2000, "Responsibilities")
            .range(
                "interviewRounds",
                self.interview_rounds,
                1,
                10,
                "Minimum 1 interview round required",
                "Maximum 10 interview rounds allowed",
            )
            .length("interviewProcess", &self.interview_process, 10, 1000, "Interview process");
        if let Some(n) = self.shortlisted_candidates {
            v.range(
                "shortlistedCandidates",
                n,
                0,
                i32::MAX as i64,
                "Shortlisted candidates cannot be negative",
                "Shortlisted candidates is too large",
            );
        }
        if let Some(n) = self.number_of_positions {
            v.range(
                "numberOfPositions",
                n,
                1,
                i32::MAX as i64,
                "At least 1 position required",
                "Number of positions is too large",
            );
        }
        v.length("location", &self.location, 2, 100, "Location")
            .check(
                "type",
                JOB_TYPES.contains(&self.job_type.as_str()),
                "Please select a valid job type",
            )
            .length("experience", &self.experience, 2, 20, "Experience")
            .check(
                "education",
                EDUCATION_LEVELS.contains(&self.education.as_str()),
                "Please select a valid education level",
            );

        let status = match self.status.as_deref() {
            None => Some(JobStatus::Open),
            Some(raw) => raw.parse::<JobStatus>().ok(),
        };
        v.check("status", status.is_some(), "Status must be either Open or Closed")
            .check("skills", !self.skills.is_empty(), "At least one skill is required")
            .one_of_each("skills", &self.skills, SKILLS, "Please select valid skills")
            .range(
                "threshold",
                self.threshold,
                1,
                100,
                "Minimum threshold is 1",
                "Maximum threshold is 100",
            );
        if let Some(summary) = &self.jd_summary {
            v.check(
                "jdSummary",
                summary.chars().count() <= 50_000,
                "Job summary cannot exceed 50000 characters",
            );
        }
        v.finish()?;

        Ok(NewJob {
            title: self.title,
            description: self.description,
            role: self.role,
            responsibilities: self.responsibilities,
            interview_rounds: self.interview_rounds as i32,
            interview_process: self.interview_process,
            shortlisted_candidates: self.shortlisted_candidates.unwrap_or(0) as i32,
            number_of_positions: self.number_of_positions.unwrap_or(1) as i32,
            location: self.location,
            job_type: self.job_type,
            experience: self.experience,
            education: self.education,
            status: status.unwrap_or_default(),
            skills: self.skills,
            remote: self.remote.unwrap_or(false),
            deadline: self.deadline,
            threshold: self.threshold as i32,
            jd_summary: non_empty(self.jd_summary),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> serde_json::Value {
        json!({
            "title": "Senior Rust Engineer",
            "description": "Own the matching and screening pipeline.",
            "role": "Backend",
            "responsibilities": "Design APIs, review code, mentor engineers.",
            "interviewRounds": 3,
            "interviewProcess": "Phone screen, system design, team fit.",
            "location": "Bengaluru",
            "type": "Full_time",
            "experience": "4+ years",
            "education": "Bachelors_Degree",
            "skills": ["Rust", "PostgreSQL"],
            "threshold": 70,
            "deadline": "2030-01-31T00:00:00Z"
        })
    }

    fn parse(value: serde_json::Value) -> CreateJobRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_are_applied() {
        let job = parse(valid()).validate().unwrap();
        assert_eq!(job.status, JobStatus::Open);
        assert!(!job.remote);
        assert_eq!(job.number_of_positions, 1);
        assert_eq!(job.shortlisted_candidates, 0);
        assert!(job.deadline.is_some());
        assert_eq!(job.jd_summary, None);
    }

    #[test]
    fn test_unknown_skill_is_rejected() {
        let mut body = valid();
        body["skills"] = json!(["Rust", "Fortran77"]);
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn test_status_must_be_open_or_closed() {
        let mut body = valid();
        body["status"] = json!("Paused");
        match parse(body).validate() {
            Err(AppError::InvalidInput { message, .. }) => {
                assert_eq!(message, "Status must be either Open or Closed")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_threshold_bounds() {
        for (threshold, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let mut body = valid();
            body["threshold"] = json!(threshold);
            assert_eq!(parse(body).validate().is_ok(), ok, "threshold {threshold}");
        }
    }

    #[test]
    fn test_interview_rounds_bounds() {
        let mut body = valid();
        body["interviewRounds"] = json!(11);
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn test_missing_skills_reported() {
        let mut body = valid();
        body["skills"] = json!([]);
        match parse(body).validate() {
            Err(AppError::InvalidInput { errors, .. }) => {
                assert!(errors.iter().any(|e| e.message == "At least one skill is required"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
