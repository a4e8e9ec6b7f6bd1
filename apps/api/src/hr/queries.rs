use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::decisions::Transition;
use crate::models::candidate::CandidateRow;

/// A candidate together with the posting and company it applied to.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateInCompany {
    #[sqlx(flatten)]
    pub candidate: CandidateRow,
    pub job_title: String,
    pub company_name: String,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HrStats {
    pub total_jobs: i64,
    pub average_threshold: Option<f64>,
    pub total_positions: Option<i64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Looks up a candidate who applied to a job of `company_id`.
pub async fn find_candidate_in_company(
    pool: &PgPool,
    id: Uuid,
    company_id: i32,
) -> Result<Option<CandidateInCompany>, sqlx::Error> {
    sqlx::query_as::<_, CandidateInCompany>(
        r#"
        SELECT c.*, j.title AS job_title, co.name AS company_name
        FROM candidates c
        JOIN jobs j ON j.id = c.job_id
        JOIN companies co ON co.id = j.company_id
        WHERE c.id = $1 AND j.company_id = $2
        "#,
    )
    .bind(id)
    .bind(company_id)
    .fetch_optional(pool)
    .await
}

/// Applies `transition` only if the candidate is still in `transition.from`.
/// Returns whether a row changed.
pub async fn apply_transition(
    pool: &PgPool,
    id: Uuid,
    transition: Transition,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE candidates SET status = $3, updated_at = now() WHERE id = $1 AND status = $2",
    )
    .bind(id)
    .bind(transition.from.as_str())
    .bind(transition.to.as_str())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn stats_for_hr(pool: &PgPool, hr_id: i32) -> Result<HrStats, sqlx::Error> {
    sqlx::query_as::<_, HrStats>(
        r#"
        SELECT COUNT(*)                           AS total_jobs,
               AVG(threshold)::float8             AS average_threshold,
               SUM(number_of_positions)::bigint   AS total_positions
        FROM jobs
        WHERE hr_id = $1
        "#,
    )
    .bind(hr_id)
    .fetch_one(pool)
    .await
}

pub async fn job_status_distribution(
    pool: &PgPool,
    hr_id: i32,
) -> Result<Vec<StatusCount>, sqlx::Error> {
    sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM jobs WHERE hr_id = $1 GROUP BY status ORDER BY status",
    )
    .bind(hr_id)
    .fetch_all(pool)
    .await
}

pub async fn candidate_status_distribution(
    pool: &PgPool,
    hr_id: i32,
) -> Result<Vec<StatusCount>, sqlx::Error> {
    sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM candidates WHERE hr_id = $1 GROUP BY status ORDER BY status",
    )
    .bind(hr_id)
    .fetch_all(pool)
    .await
}
