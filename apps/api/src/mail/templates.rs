//! Message bodies for every email the service sends.

use super::OutgoingMail;

/// Who a candidate-facing message is about.
#[derive(Debug, Clone)]
pub struct CandidateContext<'a> {
    pub email: &'a str,
    pub full_name: String,
    pub job_title: &'a str,
    pub company: &'a str,
}

pub fn hr_welcome(username: &str, email: &str, password: &str) -> OutgoingMail {
    OutgoingMail {
        to: email.to_string(),
        subject: "Welcome to Our Company - HR Account Created".to_string(),
        body: format!(
            "Hello {username},

Your HR account has been successfully created.

Login Credentials:
Email: {email}
Password: {password}

Please log in and change your password after your first login.

Regards,
Admin Team"
        ),
    }
}

pub fn password_reset(email: &str, link: &str) -> OutgoingMail {
    OutgoingMail {
        to: email.to_string(),
        subject: "Reset password".to_string(),
        body: format!(
            "We received a request to reset your password.

Open the link below to choose a new one. It expires in 24 hours and can be used once:

{link}

If you did not ask for this, you can ignore this email."
        ),
    }
}

pub fn application_received(ctx: &CandidateContext<'_>) -> OutgoingMail {
    let CandidateContext {
        email,
        full_name,
        job_title,
        company,
    } = ctx;
    OutgoingMail {
        to: email.to_string(),
        subject: "Thank You for Applying - We've Received Your Application".to_string(),
        body: format!(
            "Hello {full_name},

Thank you for applying for the position of {job_title} at {company}.

We have successfully received your application and our recruitment team will review your profile. If your qualifications match our requirements, we will reach out to you for the next steps.

We appreciate your interest in joining our team and wish you the best of luck.

Best regards,
{company} HR Team"
        ),
    }
}

/// HR confirms the screening service's shortlist decision.
pub fn selection_confirmation(
    to: &str,
    subject: &str,
    full_name: &str,
    company: &str,
    ai_body: &str,
) -> OutgoingMail {
    let ai_body = ai_body.trim();
    OutgoingMail {
        to: to.to_string(),
        subject: subject.to_string(),
        body: format!(
            "Dear {full_name},

We're pleased to inform you that you've been selected to move forward in the hiring process for the position at {company}. Congratulations!

Below is a summary of the feedback generated from our AI-based screening system:

{ai_body}

Our HR team will reach out to you shortly with details regarding the next steps.

Thank you once again for your interest in joining {company}. We look forward to connecting with you soon.

Best regards,
Recruitment Team
{company}"
        ),
    }
}

/// HR confirms the screening service's rejection decision.
pub fn rejection_confirmation(
    to: &str,
    subject: &str,
    full_name: &str,
    company: &str,
    ai_body: &str,
) -> OutgoingMail {
    let ai_body = ai_body.trim();
    OutgoingMail {
        to: to.to_string(),
        subject: subject.to_string(),
        body: format!(
            "Dear {full_name},

Thank you for your interest in the position at {company}. After reviewing your application, our HR team has decided not to move forward at this time.

Below is a summary of the feedback generated from our AI-based screening system:

{ai_body}

We appreciate the time you invested and encourage you to apply for future openings at {company}.

Best regards,
Recruitment Team
{company}"
        ),
    }
}

/// HR overturns a shortlist. `ai_body` is the screening service's original note, if any.
pub fn override_to_reject(
    ctx: &CandidateContext<'_>,
    ai_body: Option<&str>,
    hr_reason: &str,
) -> OutgoingMail {
    let CandidateContext {
        email,
        full_name,
        job_title,
        company,
    } = ctx;
    let initial = match ai_body.map(str::trim).filter(|b| !b.is_empty()) {
        Some(body) => format!(
            "Our AI-based system initially shortlisted your profile:\n\"{body}\"\n\n"
        ),
        None => "Our AI-based system initially shortlisted your profile.\n\n".to_string(),
    };
    OutgoingMail {
        to: email.to_string(),
        subject: "Update on Your Application Status".to_string(),
        body: format!(
            "Hello {full_name},

Thank you for applying for the position of {job_title} at {company}.

{initial}However, after internal review, our HR team decided not to proceed because {hr_reason}.

We appreciate your interest and invite you to apply for future roles.

Warm regards,
HR Team at {company}"
        ),
    }
}

/// HR overturns a rejection.
pub fn override_to_shortlist(ctx: &CandidateContext<'_>, hr_reason: &str) -> OutgoingMail {
    let CandidateContext {
        email,
        full_name,
        job_title,
        company,
    } = ctx;
    OutgoingMail {
        to: email.to_string(),
        subject: "You've Been Shortlisted!".to_string(),
        body: format!(
            "Hello {full_name},

Thank you for applying for the position of {job_title} at {company}.

While our AI system initially rejected your profile, our HR team reviewed your application and felt that {hr_reason}.

Based on this, you've been shortlisted for the next step.

Best regards,
HR Team at {company}"
        ),
    }
}

pub fn ai_acceptance(ctx: &CandidateContext<'_>, reason: &str) -> OutgoingMail {
    let CandidateContext {
        email,
        full_name,
        job_title,
        company,
    } = ctx;
    OutgoingMail {
        to: email.to_string(),
        subject: format!("AI Resume Shortlisting for {job_title} at {company}"),
        body: format!(
            "Hello {full_name},

I am an AI assistant representing the hiring team at {company}. Thank you for applying for the position of {job_title} at our company.

I am pleased to inform you that you have been shortlisted in our initial AI-powered resume screening process. You were selected because {reason}.

Your application details, along with your CV, have been shared with the HR and technical team at {company}. They will carefully review your profile and reach out to you with further steps or interview details shortly.

Wishing you all the best!

Warm regards,
AI Assistant,
Hiring Team at {company}"
        ),
    }
}

pub fn ai_rejection(ctx: &CandidateContext<'_>, reason: &str) -> OutgoingMail {
    let CandidateContext {
        email,
        full_name,
        job_title,
        company,
    } = ctx;
    OutgoingMail {
        to: email.to_string(),
        subject: format!("AI Resume Screening Rejection for {job_title} at {company}"),
        body: format!(
            "Hello {full_name},

I am an AI assistant representing the hiring team at {company}. Thank you for applying for the position of {job_title} at our company.

After our initial AI-powered resume screening process, your profile was not selected to move forward. The reason given was that {reason}.

Your application details, along with your CV, have been shared with the HR team at {company}, who make the final decision and may still reach out to you.

Wishing you all the best!

Warm regards,
AI Assistant,
Hiring Team at {company}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CandidateContext<'static> {
        CandidateContext {
            email: "asha@example.com",
            full_name: "Asha Rao".to_string(),
            job_title: "Platform Engineer",
            company: "Acme",
        }
    }

    #[test]
    fn test_welcome_contains_credentials() {
        let mail = hr_welcome("priya", "priya@acme.io", "s3cretpass");
        assert_eq!(mail.to, "priya@acme.io");
        assert!(mail.body.contains("Email: priya@acme.io"));
        assert!(mail.body.contains("Password: s3cretpass"));
    }

    #[test]
    fn test_application_received_names_job_and_company() {
        let mail = application_received(&ctx());
        assert!(mail.body.starts_with("Hello Asha Rao,"));
        assert!(mail.body.contains("Platform Engineer at Acme"));
        assert!(mail.body.ends_with("Acme HR Team"));
    }

    #[test]
    fn test_override_to_reject_quotes_ai_note() {
        let mail = override_to_reject(&ctx(), Some("  Strong Rust background.  "), "the role was filled");
        assert_eq!(mail.subject, "Update on Your Application Status");
        assert!(mail.body.contains("\"Strong Rust background.\""));
        assert!(mail.body.contains("decided not to proceed because the role was filled."));
    }

    #[test]
    fn test_override_to_reject_without_ai_note() {
        let mail = override_to_reject(&ctx(), None, "the role was filled");
        assert!(!mail.body.contains('"'));
        assert!(mail.body.contains("initially shortlisted your profile.\n\nHowever"));
    }

    #[test]
    fn test_override_to_shortlist_includes_reason() {
        let mail = override_to_shortlist(&ctx(), "your open source work stood out");
        assert_eq!(mail.subject, "You've Been Shortlisted!");
        assert!(mail.body.contains("felt that your open source work stood out."));
    }

    #[test]
    fn test_ai_subjects_name_job_and_company() {
        assert_eq!(
            ai_acceptance(&ctx(), "x").subject,
            "AI Resume Shortlisting for Platform Engineer at Acme"
        );
        assert_eq!(
            ai_rejection(&ctx(), "x").subject,
            "AI Resume Screening Rejection for Platform Engineer at Acme"
        );
    }

    #[test]
    fn test_selection_confirmation_trims_ai_body() {
        let mail = selection_confirmation("a@b.io", "Next steps", "Asha Rao", "Acme", "\n Great fit \n");
        assert_eq!(mail.subject, "Next steps");
        assert!(mail.body.contains("system:\n\nGreat fit\n\nOur HR team"));
    }
}
