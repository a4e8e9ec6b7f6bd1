use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::vocabulary::{CORE_TECHNOLOGIES, INDUSTRIES};
use crate::validation::{is_phone, Validator};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
    pub about: String,
    pub company_size: i64,
    pub locations: Vec<String>,
    pub headquarters: String,
    pub founded_year: i64,
    pub core_technologies: Vec<String>,
    pub industry: String,
    pub website: Option<String>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// A validated company profile. Optional links are stored as `""` when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
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
}

impl CreateCompanyRequest {
    pub fn validate(self) -> Result<NewCompany, AppError> {
        let current_year = Utc::now().year() as i64;
        let mut v = Validator::new();
        v.length("name", &self.name, 3, 100, "Company name")
            .length("about", &self.about, 10, 2000, "About section")
            .range(
                "companySize",
                self.company_size,
                1,
                1_000_000,
                "Company size must be at least 1",
                "Company size cannot exceed 1,000,000",
            )
            .check(
                "locations",
                !self.locations.is_empty(),
                "At least one location is required",
            );
        for location in &self.locations {
            v.length("locations", location, 2, 100, "Each location");
        }
        v.length("headquarters", &self.headquarters, 2, 100, "Headquarters")
            .range(
                "foundedYear",
                self.founded_year,
                1800,
                current_year,
                "Founded year cannot be before 1800",
                "Founded year cannot be in the future",
            )
            .check(
                "coreTechnologies",
                !self.core_technologies.is_empty(),
                "At least one core technology is required",
            )
            .check(
                "coreTechnologies",
                self.core_technologies.len() <= 20,
                "Cannot select more than 20 core technologies",
            )
            .one_of_each(
                "coreTechnologies",
                &self.core_technologies,
                CORE_TECHNOLOGIES,
                "Please select valid core technologies",
            )
            .check(
                "industry",
                INDUSTRIES.contains(&self.industry.as_str()),
                "Please select a valid industry",
            );

        for (field, value, label) in [
            ("website", &self.website, "Website"),
            ("linkedIn", &self.linked_in, "LinkedIn"),
            ("twitter", &self.twitter, "Twitter"),
            ("facebook", &self.facebook, "Facebook"),
            ("instagram", &self.instagram, "Instagram"),
        ] {
            let value = value.as_deref();
            v.optional_url(field, value, &format!("{label} must be a valid URL"));
            if let Some(url) = value {
                v.check(
                    field,
                    url.chars().count() <= 200,
                    &format!("{label} URL cannot exceed 200 characters"),
                );
            }
        }

        if let Some(email) = self.contact_email.as_deref().filter(|e| !e.is_empty()) {
            v.email("contactEmail", email, "Contact email must be valid")
                .check(
                    "contactEmail",
                    email.chars().count() <= 100,
                    "Contact email cannot exceed 100 characters",
                );
        }
        if let Some(phone) = self.contact_phone.as_deref().filter(|p| !p.is_empty()) {
            v.length("contactPhone", phone, 6, 20, "Contact phone")
                .check(
                    "contactPhone",
                    is_phone(phone),
                    "Contact phone must be a valid phone number",
                );
        }
        v.finish()?;

        Ok(NewCompany {
            name: self.name,
            about: self.about,
            company_size: self.company_size as i32,
            locations: self.locations,
            headquarters: self.headquarters,
            founded_year: self.founded_year as i32,
            core_technologies: self.core_technologies,
            industry: self.industry,
            website: self.website.unwrap_or_default(),
            linked_in: self.linked_in.unwrap_or_default(),
            twitter: self.twitter.unwrap_or_default(),
            facebook: self.facebook.unwrap_or_default(),
            instagram: self.instagram.unwrap_or_default(),
            contact_email: self.contact_email.unwrap_or_default(),
            contact_phone: self.contact_phone.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> serde_json::Value {
        json!({
            "name": "Acme Robotics",
            "about": "We build warehouse robots and the software that runs them.",
            "companySize": 250,
            "locations": ["Pune", "Berlin"],
            "headquarters": "Pune",
            "foundedYear": 2012,
            "coreTechnologies": ["Machine_Learning", "Cloud_Computing"],
            "industry": "Technology",
            "website": "https://acme.example.com",
            "linkedIn": "",
            "contactEmail": "talent@acme.example.com",
            "contactPhone": "+91 20 5555-0101"
        })
    }

    fn parse(value: serde_json::Value) -> CreateCompanyRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_company_normalizes_missing_links() {
        let company = parse(valid()).validate().unwrap();
        assert_eq!(company.linked_in, "");
        assert_eq!(company.twitter, "");
        assert_eq!(company.website, "https://acme.example.com");
    }

    #[test]
    fn test_future_founding_year_rejected() {
        let mut body = valid();
        body["foundedYear"] = json!(Utc::now().year() + 1);
        match parse(body).validate() {
            Err(AppError::InvalidInput { message, .. }) => {
                assert_eq!(message, "Founded year cannot be in the future")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_industry_rejected() {
        let mut body = valid();
        body["industry"] = json!("Mining");
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn test_bad_social_link_rejected() {
        let mut body = valid();
        body["twitter"] = json!("@acme");
        match parse(body).validate() {
            Err(AppError::InvalidInput { errors, .. }) => {
                assert_eq!(errors[0].field, "twitter");
                assert_eq!(errors[0].message, "Twitter must be a valid URL");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_phone_pattern_enforced() {
        let mut body = valid();
        body["contactPhone"] = json!("call-me-maybe");
        assert!(parse(body).validate().is_err());
    }

    #[test]
    fn test_requires_locations() {
        let mut body = valid();
        body["locations"] = json!([]);
        assert!(parse(body).validate().is_err());
    }
}
