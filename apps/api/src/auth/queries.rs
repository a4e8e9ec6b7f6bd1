use sqlx::PgPool;

use crate::models::account::{AdminRow, HrRow};

pub async fn find_admin_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminRow>, sqlx::Error> {
    sqlx::query_as::<_, AdminRow>("SELECT * FROM admins WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_admin_by_id(pool: &PgPool, id: i32) -> Result<Option<AdminRow>, sqlx::Error> {
    sqlx::query_as::<_, AdminRow>("SELECT * FROM admins WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_admin(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<AdminRow, sqlx::Error> {
    sqlx::query_as::<_, AdminRow>(
        r#"
        INSERT INTO admins (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn update_admin_password(
    pool: &PgPool,
    id: i32,
    password_hash: &str,
) -> Result<AdminRow, sqlx::Error> {
    sqlx::query_as::<_, AdminRow>(
        "UPDATE admins SET password_hash = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_hr_by_email(pool: &PgPool, email: &str) -> Result<Option<HrRow>, sqlx::Error> {
    sqlx::query_as::<_, HrRow>("SELECT * FROM hrs WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_hr_by_id(pool: &PgPool, id: i32) -> Result<Option<HrRow>, sqlx::Error> {
    sqlx::query_as::<_, HrRow>("SELECT * FROM hrs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_hr_password(
    pool: &PgPool,
    id: i32,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE hrs SET password_hash = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}
