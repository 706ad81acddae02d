//! Role-based access rules.
//!
//! Every mutating endpoint resolves the caller into an [`Actor`] and asks
//! [`authorize`] before touching the store. A denial is reported to the
//! caller as forbidden; results are never silently filtered.

use thiserror::Error;

use crate::application::Application;
use crate::ids::{CompanyId, UserId};
use crate::job::Job;
use crate::user::{Role, User};

/// The authenticated caller as seen by the access rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
            company_id: user.company_id.clone(),
        }
    }
}

impl Actor {
    /// HR admin of the given company.
    pub fn is_hr_of(&self, company_id: &CompanyId) -> bool {
        self.role == Role::Hr && self.company_id.as_ref() == Some(company_id)
    }

    pub fn authorize(&self, action: Action<'_>) -> Result<(), AccessDenied> {
        authorize(self, action)
    }
}

/// An operation that requires a permission check.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateJob,
    UpdateJob { job: &'a Job },
    CreateApplication,
    ViewCompanyApplications,
    /// `job_company` is the company owning the application's job.
    ViewApplication {
        application: &'a Application,
        job_company: &'a CompanyId,
    },
    UpdateApplicationStatus { job_company: &'a CompanyId },
    CreateCompany,
    UpdateCompany { company_id: &'a CompanyId },
}

/// Permission denied, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AccessDenied(pub String);

impl AccessDenied {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Decide whether `actor` may perform `action`.
pub fn authorize(actor: &Actor, action: Action<'_>) -> Result<(), AccessDenied> {
    match action {
        Action::CreateJob => require_role(actor, Role::Referrer, "Only referrers can create jobs"),
        Action::UpdateJob { job } => {
            require_role(actor, Role::Referrer, "Only referrers can update jobs")?;
            if job.referrer_id != actor.user_id {
                return Err(AccessDenied::new("Only the posting referrer can update this job"));
            }
            Ok(())
        }
        Action::CreateApplication => require_role(actor, Role::Candidate, "Only candidates can apply"),
        Action::ViewCompanyApplications => {
            if actor.role != Role::Hr || actor.company_id.is_none() {
                return Err(AccessDenied::new("Only HR admins can view company applications"));
            }
            Ok(())
        }
        Action::ViewApplication {
            application,
            job_company,
        } => {
            let allowed = application.candidate_id == actor.user_id
                || application.referrer_id == actor.user_id
                || actor.is_hr_of(job_company);
            if !allowed {
                return Err(AccessDenied::new("Access denied"));
            }
            Ok(())
        }
        Action::UpdateApplicationStatus { job_company } => {
            require_role(actor, Role::Hr, "Only HR admins can update application status")?;
            if !actor.is_hr_of(job_company) {
                return Err(AccessDenied::new(
                    "Application belongs to another company",
                ));
            }
            Ok(())
        }
        Action::CreateCompany => {
            require_role(actor, Role::Hr, "Only HR admins can create companies")?;
            if actor.company_id.is_some() {
                return Err(AccessDenied::new("HR admin already belongs to a company"));
            }
            Ok(())
        }
        Action::UpdateCompany { company_id } => {
            if !actor.is_hr_of(company_id) {
                return Err(AccessDenied::new("Only HR admins of this company can update it"));
            }
            Ok(())
        }
    }
}

fn require_role(actor: &Actor, role: Role, msg: &str) -> Result<(), AccessDenied> {
    if actor.role != role {
        return Err(AccessDenied::new(msg));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NewApplication;
    use crate::job::{JobStatus, NewJob};
    use chrono::Utc;

    fn actor(id: &str, role: Role, company: Option<&str>) -> Actor {
        Actor {
            user_id: UserId::from(id),
            role,
            company_id: company.map(CompanyId::from),
        }
    }

    fn job(referrer: &str, company: &str) -> Job {
        Job::new(
            NewJob {
                title: "Engineer".to_string(),
                description: "Desc".to_string(),
                location: None,
                work_style: None,
                skills: vec![],
                company_id: CompanyId::from(company),
                referrer_id: UserId::from(referrer),
                status: JobStatus::Active,
            },
            Utc::now(),
        )
    }

    fn application(candidate: &str, referrer: &str) -> Application {
        Application::new(
            NewApplication {
                job_id: "j1".into(),
                candidate_id: UserId::from(candidate),
                message: None,
            },
            UserId::from(referrer),
            Utc::now(),
        )
    }

    #[test]
    fn test_only_referrers_create_jobs() {
        assert!(authorize(&actor("r", Role::Referrer, Some("c")), Action::CreateJob).is_ok());
        assert!(authorize(&actor("c", Role::Candidate, None), Action::CreateJob).is_err());
        assert!(authorize(&actor("h", Role::Hr, Some("c")), Action::CreateJob).is_err());
    }

    #[test]
    fn test_only_owner_updates_job() {
        let j = job("r1", "c1");
        assert!(authorize(&actor("r1", Role::Referrer, Some("c1")), Action::UpdateJob { job: &j }).is_ok());
        assert!(authorize(&actor("r2", Role::Referrer, Some("c1")), Action::UpdateJob { job: &j }).is_err());
    }

    #[test]
    fn test_only_candidates_apply() {
        assert!(authorize(&actor("c", Role::Candidate, None), Action::CreateApplication).is_ok());
        let err = authorize(&actor("r", Role::Referrer, Some("c")), Action::CreateApplication).unwrap_err();
        assert_eq!(err.to_string(), "Only candidates can apply");
    }

    #[test]
    fn test_company_applications_need_hr_with_company() {
        assert!(authorize(&actor("h", Role::Hr, Some("c")), Action::ViewCompanyApplications).is_ok());
        assert!(authorize(&actor("h", Role::Hr, None), Action::ViewCompanyApplications).is_err());
        assert!(authorize(&actor("r", Role::Referrer, Some("c")), Action::ViewCompanyApplications).is_err());
    }

    #[test]
    fn test_status_update_scoped_to_company_hr() {
        let company = CompanyId::from("c1");
        let action = Action::UpdateApplicationStatus { job_company: &company };
        assert!(authorize(&actor("h", Role::Hr, Some("c1")), action).is_ok());
        assert!(authorize(&actor("h", Role::Hr, Some("c2")), action).is_err());
        assert!(authorize(&actor("r", Role::Referrer, Some("c1")), action).is_err());
        assert!(authorize(&actor("c", Role::Candidate, None), action).is_err());
    }

    #[test]
    fn test_view_application_parties() {
        let app = application("cand", "ref");
        let company = CompanyId::from("c1");
        let view = Action::ViewApplication {
            application: &app,
            job_company: &company,
        };
        assert!(authorize(&actor("cand", Role::Candidate, None), view).is_ok());
        assert!(authorize(&actor("ref", Role::Referrer, Some("c1")), view).is_ok());
        assert!(authorize(&actor("h", Role::Hr, Some("c1")), view).is_ok());
        assert!(authorize(&actor("other", Role::Candidate, None), view).is_err());
        assert!(authorize(&actor("h2", Role::Hr, Some("c2")), view).is_err());
    }

    #[test]
    fn test_company_management() {
        assert!(authorize(&actor("h", Role::Hr, None), Action::CreateCompany).is_ok());
        assert!(authorize(&actor("h", Role::Hr, Some("c1")), Action::CreateCompany).is_err());
        assert!(authorize(&actor("r", Role::Referrer, None), Action::CreateCompany).is_err());

        let company = CompanyId::from("c1");
        let update = Action::UpdateCompany { company_id: &company };
        assert!(authorize(&actor("h", Role::Hr, Some("c1")), update).is_ok());
        assert!(authorize(&actor("h", Role::Hr, Some("c2")), update).is_err());
    }
}
