//! Field-level request validation.
//!
//! Each request type exposes a `validate` method that feeds its fields through a
//! [`Validator`]. All failures are collected; the first one becomes the headline
//! message of the resulting `AppError::InvalidInput`.

use reqwest::Url;

use crate::errors::{AppError, FieldError};

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless `ok` holds.
    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: message.to_string(),
            });
        }
        self
    }

    /// Character-count bounds, both inclusive.
    pub fn length(
        &mut self,
        field: &str,
        value: &str,
        min: usize,
        max: usize,
        label: &str,
    ) -> &mut Self {
        let len = value.chars().count();
        if len < min {
            self.check(
                field,
                false,
                &format!("{label} must be at least {min} characters"),
            );
        } else if len > max {
            self.check(field, false, &format!("{label} cannot exceed {max} characters"));
        }
        self
    }

    pub fn range(
        &mut self,
        field: &str,
        value: i64,
        min: i64,
        max: i64,
        too_small: &str,
        too_large: &str,
    ) -> &mut Self {
        self.check(field, value >= min, too_small);
        if value >= min {
            self.check(field, value <= max, too_large);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        self.check(field, is_email(value), message)
    }

    /// Optional URL: `None` and `""` are both accepted.
    pub fn optional_url(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.check(field, is_url(v), message);
        }
        self
    }

    /// Every entry of `values` must appear in `allowed`.
    pub fn one_of_each(
        &mut self,
        field: &str,
        values: &[String],
        allowed: &[&str],
        message: &str,
    ) -> &mut Self {
        let all_known = values.iter().all(|v| allowed.contains(&v.as_str()));
        self.check(field, all_known, message)
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), AppError> {
        match self.errors.first() {
            None => Ok(()),
            Some(first) => Err(AppError::InvalidInput {
                message: first.message.clone(),
                errors: self.errors,
            }),
        }
    }
}

/// Loose structural email check: one `@`, non-empty local part, dotted domain.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

pub fn is_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

/// `^[+\d][\d\s-]+$`
pub fn is_phone(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c == '+' || c.is_ascii_digit() => {}
        _ => return false,
    }
    let rest = chars.as_str();
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-')
}

/// Treats `Some("")` as absent; used for the "optional or empty" inputs.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_common_addresses() {
        assert!(is_email("hr@acme.io"));
        assert!(is_email("first.last+jobs@mail.example.com"));
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(!is_email("acme.io"));
        assert!(!is_email("@acme.io"));
        assert!(!is_email("hr@acme"));
        assert!(!is_email("hr@@acme.io"));
        assert!(!is_email("h r@acme.io"));
        assert!(!is_email("hr@acme..io"));
    }

    #[test]
    fn test_url_requires_http_scheme_and_host() {
        assert!(is_url("https://bucket.s3.amazonaws.com/uploads/cv.pdf"));
        assert!(is_url("http://localhost:3000"));
        assert!(!is_url("ftp://example.com/file"));
        assert!(!is_url("not a url"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_phone("+91 98765-43210"));
        assert!(is_phone("0123456789"));
        assert!(!is_phone("-123456"));
        assert!(!is_phone("+"));
        assert!(!is_phone("12ab34"));
    }

    #[test]
    fn test_length_messages() {
        let mut v = Validator::new();
        v.length("name", "ab", 3, 100, "Company name");
        v.length("about", &"x".repeat(2001), 10, 2000, "About section");
        let err = v.finish().unwrap_err();
        match err {
            AppError::InvalidInput { message, errors } => {
                assert_eq!(message, "Company name must be at least 3 characters");
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[1].message, "About section cannot exceed 2000 characters");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_range_reports_only_one_bound() {
        let mut v = Validator::new();
        v.range("threshold", 0, 1, 100, "Minimum threshold is 1", "Maximum threshold is 100");
        assert!(!v.is_valid());
        let mut v = Validator::new();
        v.range("threshold", 50, 1, 100, "Minimum threshold is 1", "Maximum threshold is 100");
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_optional_url_allows_empty() {
        let mut v = Validator::new();
        v.optional_url("website", Some(""), "Website must be a valid URL");
        v.optional_url("website", None, "Website must be a valid URL");
        assert!(v.is_valid());
        v.optional_url("website", Some("acme"), "Website must be a valid URL");
        assert!(!v.is_valid());
    }

    #[test]
    fn test_one_of_each() {
        let mut v = Validator::new();
        v.one_of_each(
            "skills",
            &["Rust".to_string(), "Cobol".to_string()],
            &["Rust", "Python"],
            "Please select valid skills",
        );
        assert!(!v.is_valid());
    }
}
