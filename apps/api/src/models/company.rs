use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub id: i32,
    pub admin_id: i32,
    pub name: String,
    pub about: String,
    pub company_size: i32,
    pub locations: Vec<String>,
    pub headquarters: String,
    pub founded_year: i32,
    pub core_technologies: Vec<String>,
    pub industry: String,
    pub website: String,
    pub linked_in: String,
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields echoed back after a company is created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: i32,
    pub name: String,
    pub about: String,
    pub company_size: i32,
    pub industry: String,
    pub website: String,
    pub contact_email: String,
}

impl From<&CompanyRow> for CompanySummary {
    fn from(c: &CompanyRow) -> Self {
        CompanySummary {
            id: c.id,
            name: c.name.clone(),
            about: c.about.clone(),
            company_size: c.company_size,
            industry: c.industry.clone(),
            website: c.website.clone(),
            contact_email: c.contact_email.clone(),
        }
    }
}
