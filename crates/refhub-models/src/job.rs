//! Referral job postings and listing filters.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::company::Company;
use crate::de::empty_as_none;
use crate::error::ValidationError;
use crate::ids::{CompanyId, JobId, UserId};

/// Posting status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Open for applications
    #[default]
    Active,
    Closed,
    Paused,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
            JobStatus::Paused => "paused",
        }
    }

    /// Whether candidates may apply.
    pub fn accepts_applications(&self) -> bool {
        matches!(self, JobStatus::Active)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(JobStatus::Active),
            "closed" => Ok(JobStatus::Closed),
            "paused" => Ok(JobStatus::Paused),
            _ => Err(ValidationError::invalid("job status", s)),
        }
    }
}

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkStyle {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStyle::Remote => "remote",
            WorkStyle::Hybrid => "hybrid",
            WorkStyle::Onsite => "onsite",
        }
    }
}

impl fmt::Display for WorkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(WorkStyle::Remote),
            "hybrid" => Ok(WorkStyle::Hybrid),
            "onsite" => Ok(WorkStyle::Onsite),
            _ => Err(ValidationError::invalid("work style", s)),
        }
    }
}

/// A referral job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub work_style: Option<WorkStyle>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub company_id: CompanyId,
    /// Must reference a user with the referrer role
    pub referrer_id: UserId,
    #[serde(default)]
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a job. Owner fields come from the authenticated caller.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub work_style: Option<WorkStyle>,
    pub skills: Vec<String>,
    pub company_id: CompanyId,
    pub referrer_id: UserId,
    pub status: JobStatus,
}

/// Partial job update.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub work_style: Option<WorkStyle>,
    pub skills: Option<Vec<String>>,
    pub status: Option<JobStatus>,
}

impl Job {
    pub fn new(input: NewJob, created_at: DateTime<Utc>) -> Self {
        Self {
            id: JobId::new(),
            title: input.title,
            description: input.description,
            location: input.location,
            work_style: input.work_style,
            skills: input.skills,
            company_id: input.company_id,
            referrer_id: input.referrer_id,
            status: input.status,
            created_at,
        }
    }

    pub fn apply(&mut self, patch: JobPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.location {
            self.location = Some(v);
        }
        if let Some(v) = patch.work_style {
            self.work_style = Some(v);
        }
        if let Some(v) = patch.skills {
            self.skills = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
    }
}

/// Job listing filters. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Case-insensitive substring of title or description
    #[serde(default)]
    pub search: Option<String>,
    /// Case-insensitive substring of location
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub work_style: Option<WorkStyle>,
    /// Case-insensitive match on the owning company's industry
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<JobStatus>,
}

fn non_empty(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

impl JobFilter {
    /// Whether the filter needs company data to evaluate.
    pub fn needs_company(&self) -> bool {
        non_empty(&self.industry).is_some()
    }

    /// Check a job against the filter. `company` is the job's company, if known.
    pub fn matches(&self, job: &Job, company: Option<&Company>) -> bool {
        if let Some(search) = non_empty(&self.search) {
            if !job.title.to_lowercase().contains(&search)
                && !job.description.to_lowercase().contains(&search)
            {
                return false;
            }
        }

        if let Some(location) = non_empty(&self.location) {
            let hit = job
                .location
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&location));
            if !hit {
                return false;
            }
        }

        if let Some(style) = self.work_style {
            if job.work_style != Some(style) {
                return false;
            }
        }

        if let Some(industry) = non_empty(&self.industry) {
            if !company.is_some_and(|c| c.in_industry(&industry)) {
                return false;
            }
        }

        if let Some(company_id) = &self.company_id {
            if &job.company_id != company_id {
                return false;
            }
        }

        if let Some(status) = self.status {
            if job.status != status {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::NewCompany;

    fn job(title: &str, style: Option<WorkStyle>, location: Option<&str>) -> Job {
        Job::new(
            NewJob {
                title: title.to_string(),
                description: "Build things with Rust".to_string(),
                location: location.map(str::to_string),
                work_style: style,
                skills: vec![],
                company_id: CompanyId::from("c1"),
                referrer_id: UserId::from("r1"),
                status: JobStatus::Active,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_work_style_filter_is_exact() {
        let filter = JobFilter {
            work_style: Some(WorkStyle::Remote),
            ..Default::default()
        };
        assert!(filter.matches(&job("A", Some(WorkStyle::Remote), None), None));
        assert!(!filter.matches(&job("B", Some(WorkStyle::Hybrid), None), None));
        assert!(!filter.matches(&job("C", None, None), None));
    }

    #[test]
    fn test_search_and_location_are_case_insensitive() {
        let j = job("Senior Backend Engineer", None, Some("New York, NY"));
        let filter = JobFilter {
            search: Some("backend".to_string()),
            location: Some("new york".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&j, None));

        let filter = JobFilter {
            search: Some("rust".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&j, None), "search covers the description");

        let filter = JobFilter {
            location: Some("Austin".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&j, None));
    }

    #[test]
    fn test_industry_filter_uses_company() {
        let company = Company::new(
            NewCompany {
                name: "TechCorp".to_string(),
                industry: Some("Technology".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );
        let filter = JobFilter {
            industry: Some("technology".to_string()),
            ..Default::default()
        };
        assert!(filter.needs_company());
        assert!(filter.matches(&job("A", None, None), Some(&company)));
        assert!(!filter.matches(&job("A", None, None), None));
    }

    #[test]
    fn test_empty_query_values_are_ignored() {
        let filter: JobFilter =
            serde_json::from_str(r#"{"workStyle": "", "status": "", "search": ""}"#).unwrap();
        assert!(filter.work_style.is_none());
        assert!(filter.status.is_none());
        assert!(filter.matches(&job("A", None, None), None));
    }

    #[test]
    fn test_unknown_work_style_is_rejected() {
        let parsed: Result<JobFilter, _> = serde_json::from_str(r#"{"workStyle": "mars"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_only_active_jobs_accept_applications() {
        assert!(JobStatus::Active.accepts_applications());
        assert!(!JobStatus::Paused.accepts_applications());
        assert!(!JobStatus::Closed.accepts_applications());
    }
}
