use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::schema::NewJob;
use crate::models::account::{HrRow, HrSummary};
use crate::models::candidate::CandidateRow;
use crate::models::company::CompanyRow;
use crate::models::job::{JobRow, JobStatus};

/// A posting together with its company, posting HR, and (for staff) applicants.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(flatten)]
    pub job: JobRow,
    pub company: Option<CompanyRow>,
    pub hr: Option<HrSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<CandidateRow>>,
    pub candidate_count: i64,
}

pub async fn insert_job(
    pool: &PgPool,
    job: &NewJob,
    company_id: i32,
    hr_id: i32,
) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, title, description, role, responsibilities, interview_rounds,
             interview_process, shortlisted_candidates, number_of_positions, location,
             job_type, experience, education, status, skills, remote, deadline,
             threshold, jd_summary, company_id, hr_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.role)
    .bind(&job.responsibilities)
    .bind(job.interview_rounds)
    .bind(&job.interview_process)
    .bind(job.shortlisted_candidates)
    .bind(job.number_of_positions)
    .bind(&job.location)
    .bind(&job.job_type)
    .bind(&job.experience)
    .bind(&job.education)
    .bind(job.status.as_str())
    .bind(&job.skills)
    .bind(job.remote)
    .bind(job.deadline)
    .bind(job.threshold)
    .bind(&job.jd_summary)
    .bind(company_id)
    .bind(hr_id)
    .fetch_one(pool)
    .await
}

pub async fn find_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_jobs_for_hrs(pool: &PgPool, hr_ids: &[i32]) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE hr_id = ANY($1) ORDER BY created_at DESC",
    )
    .bind(hr_ids.to_vec())
    .fetch_all(pool)
    .await
}

/// Changes the status of a job owned by `hr_id`. `None` when no such job.
pub async fn set_job_status(
    pool: &PgPool,
    id: Uuid,
    hr_id: i32,
    status: JobStatus,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET status = $3, updated_at = now()
        WHERE id = $1 AND hr_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(hr_id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
}

/// Attaches company, HR, and candidate data to each job, preserving order.
/// Candidates are listed newest first and only when `with_candidates` is set;
/// the count is always filled in.
pub async fn hydrate_jobs(
    pool: &PgPool,
    jobs: Vec<JobRow>,
    with_candidates: bool,
) -> Result<Vec<JobView>, sqlx::Error> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let company_ids: Vec<i32> = jobs.iter().map(|j| j.company_id).collect();
    let hr_ids: Vec<i32> = jobs.iter().map(|j| j.hr_id).collect();
    let job_ids: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();

    let companies: HashMap<i32, CompanyRow> =
        sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = ANY($1)")
            .bind(company_ids)
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

    let hrs: HashMap<i32, HrSummary> =
        sqlx::query_as::<_, HrRow>("SELECT * FROM hrs WHERE id = ANY($1)")
            .bind(hr_ids)
            .fetch_all(pool)
            .await?
            .iter()
            .map(|h| (h.id, HrSummary::from(h)))
            .collect();

    let mut candidates: HashMap<Uuid, Vec<CandidateRow>> = HashMap::new();
    let mut counts: HashMap<Uuid, i64> = HashMap::new();
    if with_candidates {
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE job_id = ANY($1) ORDER BY created_at DESC",
        )
        .bind(job_ids)
        .fetch_all(pool)
        .await?;
        for row in rows {
            *counts.entry(row.job_id).or_default() += 1;
            candidates.entry(row.job_id).or_default().push(row);
        }
    } else {
        counts = sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT job_id, COUNT(*) FROM candidates WHERE job_id = ANY($1) GROUP BY job_id",
        )
        .bind(job_ids)
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();
    }

    Ok(jobs
        .into_iter()
        .map(|job| {
            JobView {
                company: companies.get(&job.company_id).cloned(),
                hr: hrs.get(&job.hr_id).cloned(),
                candidates: with_candidates
                    .then(|| candidates.remove(&job.id).unwrap_or_default()),
                candidate_count: counts.get(&job.id).copied().unwrap_or(0),
                job,
            }
        })
        .collect())
}
