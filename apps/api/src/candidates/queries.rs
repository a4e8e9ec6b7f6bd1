use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::schema::NewApplication;
use crate::models::candidate::{ApplicationReceipt, CandidateStatus};

pub async fn has_applied(pool: &PgPool, job_id: Uuid, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM candidates WHERE job_id = $1 AND email = $2)",
    )
    .bind(job_id)
    .bind(email)
    .fetch_one(pool)
    .await
}

/// Stores a new `Applied` candidate assigned to the posting's HR.
pub async fn insert_application(
    pool: &PgPool,
    app: &NewApplication,
    job_id: Uuid,
    hr_id: i32,
) -> Result<ApplicationReceipt, sqlx::Error> {
    sqlx::query_as::<_, ApplicationReceipt>(
        r#"
        INSERT INTO candidates
            (id, first_name, last_name, email, phone, resume, cover_letter, experience,
             education, projects, certifications, achievements, portfolio, linked_in,
             github, skills, status, job_id, hr_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19)
        RETURNING id, first_name, last_name, email, job_id, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&app.first_name)
    .bind(&app.last_name)
    .bind(&app.email)
    .bind(&app.phone)
    .bind(&app.resume)
    .bind(&app.cover_letter)
    .bind(Json(&app.experience))
    .bind(Json(&app.education))
    .bind(Json(&app.projects))
    .bind(&app.certifications)
    .bind(&app.achievements)
    .bind(&app.portfolio)
    .bind(&app.linked_in)
    .bind(&app.github)
    .bind(&app.skills)
    .bind(CandidateStatus::Applied.as_str())
    .bind(job_id)
    .bind(hr_id)
    .fetch_one(pool)
    .await
}
