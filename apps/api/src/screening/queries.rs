use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::decisions::Transition;
use crate::models::candidate::{AiMailResponse, CandidateRow};

pub async fn find_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Writes the verdict if the candidate is still in `transition.from`.
pub async fn store_result(
    pool: &PgPool,
    id: Uuid,
    transition: Transition,
    ai_analysis: Option<&Value>,
    ai_mail_response: Option<&AiMailResponse>,
) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>(
        r#"
        UPDATE candidates
        SET status = $3, ai_analysis = $4, ai_mail_response = $5, updated_at = now()
        WHERE id = $1 AND status = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(transition.from.as_str())
    .bind(transition.to.as_str())
    .bind(ai_analysis.map(Json))
    .bind(ai_mail_response.map(Json))
    .fetch_optional(pool)
    .await
}
