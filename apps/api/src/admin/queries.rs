use sqlx::PgPool;

use super::schema::NewCompany;
use crate::models::account::HrRow;
use crate::models::company::CompanyRow;

/// Creates the company and links it to its admin in one transaction.
pub async fn insert_company_for_admin(
    pool: &PgPool,
    admin_id: i32,
    company: &NewCompany,
) -> Result<CompanyRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, CompanyRow>(
        r#"
        INSERT INTO companies
            (admin_id, name, about, company_size, locations, headquarters, founded_year,
             core_technologies, industry, website, linked_in, twitter, facebook,
             instagram, contact_email, contact_phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING *
        "#,
    )
    .bind(admin_id)
    .bind(&company.name)
    .bind(&company.about)
    .bind(company.company_size)
    .bind(&company.locations)
    .bind(&company.headquarters)
    .bind(company.founded_year)
    .bind(&company.core_technologies)
    .bind(&company.industry)
    .bind(&company.website)
    .bind(&company.linked_in)
    .bind(&company.twitter)
    .bind(&company.facebook)
    .bind(&company.instagram)
    .bind(&company.contact_email)
    .bind(&company.contact_phone)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE admins SET company_id = $2, updated_at = now() WHERE id = $1")
        .bind(admin_id)
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(row)
}

pub async fn find_company(pool: &PgPool, id: i32) -> Result<Option<CompanyRow>, sqlx::Error> {
    sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn company_name_taken(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM companies WHERE name = $1)")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn insert_hr(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    admin_id: i32,
    company_id: i32,
) -> Result<HrRow, sqlx::Error> {
    sqlx::query_as::<_, HrRow>(
        r#"
        INSERT INTO hrs (username, email, password_hash, admin_id, company_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(admin_id)
    .bind(company_id)
    .fetch_one(pool)
    .await
}

pub async fn list_hrs_for_company(pool: &PgPool, company_id: i32) -> Result<Vec<HrRow>, sqlx::Error> {
    sqlx::query_as::<_, HrRow>("SELECT * FROM hrs WHERE company_id = $1 ORDER BY created_at")
        .bind(company_id)
        .fetch_all(pool)
        .await
}

pub async fn list_hrs_for_admin(pool: &PgPool, admin_id: i32) -> Result<Vec<HrRow>, sqlx::Error> {
    sqlx::query_as::<_, HrRow>("SELECT * FROM hrs WHERE admin_id = $1 ORDER BY created_at")
        .bind(admin_id)
        .fetch_all(pool)
        .await
}
