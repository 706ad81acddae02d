//! Applications and their status workflow.
//!
//! Status moves along applied → reviewing → interview → hired | rejected, but
//! no transition table is enforced: an authorized HR user may write any value
//! of the set at any time. Every write goes through [`Application::set_status`]
//! so `updated_at` always reflects the last explicit change.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{ApplicationId, JobId, UserId};

/// Application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Reviewing,
    Interview,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Whether this is an end state. Informational only; it does not block updates.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    /// Must reference a user with the candidate role
    pub candidate_id: UserId,
    /// Copied from the job at creation
    pub referrer_id: UserId,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub message: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: JobId,
    pub candidate_id: UserId,
    pub message: Option<String>,
}

impl Application {
    /// Build a fresh application in the `applied` state.
    pub fn new(input: NewApplication, referrer_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: ApplicationId::new(),
            job_id: input.job_id,
            candidate_id: input.candidate_id,
            referrer_id,
            status: ApplicationStatus::Applied,
            message: input.message,
            applied_at: now,
            updated_at: now,
        }
    }

    /// Explicitly set the status and bump `updated_at`.
    pub fn set_status(&mut self, status: ApplicationStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}
