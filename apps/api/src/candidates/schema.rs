use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::vocabulary::SKILLS;
use crate::validation::{is_phone, is_url, non_empty, Validator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployed_link: Option<String>,
    pub time_period: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume: String,
    pub cover_letter: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
    pub portfolio: Option<String>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub skills: Vec<String>,
}

/// A validated application. Empty optional strings have been dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume: String,
    pub cover_letter: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
    pub portfolio: Option<String>,
    pub linked_in: Option<String>,
    pub github: Option<String>,
    pub skills: Vec<String>,
}

impl ApplicationRequest {
    pub fn validate(self) -> Result<NewApplication, AppError> {
        let mut v = Validator::new();
        v.length("firstName", &self.first_name, 2, 50, "First name")
            .length("lastName", &self.last_name, 2, 50, "Last name")
            .email("email", &self.email, "Please enter a valid email address")
            .check(
                "email",
                self.email.chars().count() <= 100,
                "Email cannot exceed 100 characters",
            );

        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            let digits = phone.chars().count();
            v.check("phone", digits >= 10, "Phone number must be at least 10 digits")
                .check("phone", digits <= 15, "Phone number cannot exceed 15 digits")
                .check("phone", is_phone(phone), "Please enter a valid phone number");
        }

        v.check(
            "resume",
            is_url(&self.resume),
            "Resume must be a valid URL",
        );
        if let Some(letter) = &self.cover_letter {
            v.check(
                "coverLetter",
                letter.chars().count() <= 50_000,
                "Cover letter cannot exceed 50000 characters",
            );
        }

        v.check(
            "experience",
            self.experience.len() <= 10,
            "Maximum 10 experience entries allowed",
        );
        for entry in &self.experience {
            validate_experience(&mut v, entry);
        }

        v.check(
            "education",
            self.education.len() <= 5,
            "Maximum 5 education entries allowed",
        );
        for entry in &self.education {
            v.length("education.institution", &entry.institution, 2, 100, "Institution name")
                .length("education.degree", &entry.degree, 2, 100, "Degree")
                .length("education.fieldOfStudy", &entry.field_of_study, 2, 100, "Field of study")
                .length("education.year", &entry.year, 4, 50, "Year");
        }

        v.check(
            "projects",
            self.projects.len() <= 10,
            "Maximum 10 project entries allowed",
        );
        for project in &self.projects {
            validate_project(&mut v, project);
        }

        v.check(
            "certifications",
            self.certifications.len() <= 20,
            "Maximum 20 certifications allowed",
        );
        for cert in &self.certifications {
            v.length("certifications", cert, 2, 200, "Each certification");
        }
        v.check(
            "achievements",
            self.achievements.len() <= 20,
            "Maximum 20 achievements allowed",
        );
        for achievement in &self.achievements {
            v.length("achievements", achievement, 10, 500, "Each achievement");
        }

        v.optional_url("portfolio", self.portfolio.as_deref(), "Portfolio must be a valid URL")
            .optional_url("linkedIn", self.linked_in.as_deref(), "LinkedIn must be a valid URL")
            .optional_url("github", self.github.as_deref(), "GitHub must be a valid URL")
            .check("skills", !self.skills.is_empty(), "At least one skill is required")
            .check("skills", self.skills.len() <= 20, "Maximum 20 skills allowed")
            .one_of_each("skills", &self.skills, SKILLS, "Please select valid skills");
        v.finish()?;

        Ok(NewApplication {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: non_empty(self.phone),
            resume: self.resume,
            cover_letter: non_empty(self.cover_letter),
            experience: self
                .experience
                .into_iter()
                .map(|e| Experience {
                    description: non_empty(e.description),
                    ..e
                })
                .collect(),
            education: self.education,
            projects: self
                .projects
                .into_iter()
                .map(|p| Project {
                    github_link: non_empty(p.github_link),
                    deployed_link: non_empty(p.deployed_link),
                    ..p
                })
                .collect(),
            certifications: self.certifications,
            achievements: self.achievements,
            portfolio: non_empty(self.portfolio),
            linked_in: non_empty(self.linked_in),
            github: non_empty(self.github),
            skills: self.skills,
        })
    }
}

fn validate_experience(v: &mut Validator, entry: &Experience) {
    v.length("experience.company", &entry.company, 2, 100, "Company name")
        .length("experience.position", &entry.position, 2, 100, "Position")
        .length("experience.duration", &entry.duration, 4, 50, "Duration");
    if let Some(description) = &entry.description {
        v.check(
            "experience.description",
            description.chars().count() <= 5000,
            "Description cannot exceed 5000 characters",
        );
    }
}

fn validate_project(v: &mut Validator, project: &Project) {
    v.length("projects.title", &project.title, 2, 100, "Project title")
        .length("projects.description", &project.description, 10, 2000, "Project description")
        .check(
            "projects.techStack",
            project.tech_stack.len() <= 20,
            "Maximum 20 technologies per project allowed",
        );
    for tech in &project.tech_stack {
        v.length("projects.techStack", tech, 1, 50, "Each technology");
    }
    v.optional_url(
        "projects.githubLink",
        project.github_link.as_deref(),
        "GitHub link must be a valid URL",
    )
    .optional_url(
        "projects.deployedLink",
        project.deployed_link.as_deref(),
        "Deployed link must be a valid URL",
    )
    .length("projects.timePeriod", &project.time_period, 4, 50, "Time period");
}
