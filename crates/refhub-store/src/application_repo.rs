//! Repository for job applications.

use chrono::{DateTime, Utc};
use tracing::info;

use refhub_models::{
    Application, ApplicationId, ApplicationStatus, CompanyId, Job, NewApplication, Role, UserId,
};

use crate::database::{Database, Tables};
use crate::error::{StoreError, StoreResult};
use crate::metrics::record_operation;
use crate::sorting::newest_first;

const TABLE: &str = "applications";

/// Repository for applications.
#[derive(Clone)]
pub struct ApplicationRepository {
    db: Database,
}

impl ApplicationRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &ApplicationId) -> StoreResult<Option<Application>> {
        Ok(self.db.read().await.applications.get(id).cloned())
    }

    /// Get an application together with the job it targets.
    pub async fn get_with_job(&self, id: &ApplicationId) -> StoreResult<Option<(Application, Job)>> {
        let tables = self.db.read().await;
        let Some(application) = tables.applications.get(id) else {
            return Ok(None);
        };
        let job = tables
            .jobs
            .get(&application.job_id)
            .ok_or_else(|| StoreError::not_found("Job", &application.job_id))?;
        Ok(Some((application.clone(), job.clone())))
    }

    /// Create an application in the `applied` state.
    ///
    /// The candidate must hold the candidate role and may apply to an active
    /// job at most once. The referrer is copied from the job.
    pub async fn create(&self, input: NewApplication) -> StoreResult<Application> {
        let result = async {
            let mut tables = self.db.write().await;

            match tables.users.get(&input.candidate_id) {
                Some(user) if user.has_role(Role::Candidate) => {}
                Some(_) => {
                    return Err(StoreError::invalid_reference(format!(
                        "user {} is not a candidate",
                        input.candidate_id
                    )))
                }
                None => {
                    return Err(StoreError::invalid_reference(format!(
                        "user {} does not exist",
                        input.candidate_id
                    )))
                }
            }

            let job = tables
                .jobs
                .get(&input.job_id)
                .ok_or_else(|| StoreError::not_found("Job", &input.job_id))?;
            if !job.status.accepts_applications() {
                return Err(StoreError::invalid_state(format!(
                    "Job is {} and not accepting applications",
                    job.status
                )));
            }
            let referrer_id = job.referrer_id.clone();

            let duplicate = tables
                .applications
                .values()
                .any(|a| a.job_id == input.job_id && a.candidate_id == input.candidate_id);
            if duplicate {
                return Err(StoreError::already_exists(
                    "You have already applied to this job",
                ));
            }

            let application = Application::new(input, referrer_id, Utc::now());
            tables
                .applications
                .insert(application.id.clone(), application.clone());

            info!(
                "Created application {} for job {}",
                application.id, application.job_id
            );
            Ok(application)
        }
        .await;

        record_operation(TABLE, "create", &result);
        result
    }

    /// Applications submitted by a candidate, newest first.
    pub async fn list_by_candidate(&self, candidate_id: &UserId) -> StoreResult<Vec<Application>> {
        let tables = self.db.read().await;
        Ok(collect(&tables, |a| &a.candidate_id == candidate_id))
    }

    /// Applications to jobs posted by a referrer, newest first.
    pub async fn list_by_referrer(&self, referrer_id: &UserId) -> StoreResult<Vec<Application>> {
        let tables = self.db.read().await;
        Ok(collect(&tables, |a| &a.referrer_id == referrer_id))
    }

    /// Applications to jobs owned by a company, newest first.
    pub async fn list_by_company(&self, company_id: &CompanyId) -> StoreResult<Vec<Application>> {
        let tables = self.db.read().await;
        Ok(collect(&tables, |a| {
            tables
                .jobs
                .get(&a.job_id)
                .is_some_and(|job| &job.company_id == company_id)
        }))
    }

    /// Set an application's status, stamping `updated_at` with `now`.
    pub async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        now: DateTime<Utc>,
    ) -> StoreResult<Application> {
        let result = async {
            let mut tables = self.db.write().await;
            let application = tables
                .applications
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found("Application", id))?;
            application.set_status(status, now);
            Ok(application.clone())
        }
        .await;

        if let Ok(application) = &result {
            info!("Application {} moved to {}", application.id, application.status);
        }
        record_operation(TABLE, "update_status", &result);
        result
    }
}

fn collect(tables: &Tables, keep: impl Fn(&Application) -> bool) -> Vec<Application> {
    let mut rows: Vec<Application> = tables
        .applications
        .values()
        .filter(|a| keep(a))
        .cloned()
        .collect();
    newest_first(&mut rows, |a| (a.applied_at, a.id.clone()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use refhub_models::{JobId, JobPatch, JobStatus, NewCompany, NewJob, NewUser};

    struct Fixture {
        db: Database,
        company: CompanyId,
        referrer: UserId,
        candidate: UserId,
        job: JobId,
    }

    async fn user(db: &Database, email: &str, role: Role, company: Option<CompanyId>) -> UserId {
        db.users()
            .create(NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                role,
                company_id: company,
            })
            .await
            .unwrap()
            .id
    }

    async fn fixture() -> Fixture {
        let db = Database::new();
        let hr = user(&db, "hr@acme.test", Role::Hr, None).await;
        let (company, _) = db
            .companies()
            .create_with_admin(
                NewCompany {
                    name: "Acme".to_string(),
                    ..Default::default()
                },
                &hr,
            )
            .await
            .unwrap();
        let referrer = user(&db, "ref@acme.test", Role::Referrer, Some(company.id.clone())).await;
        let candidate = user(&db, "cand@example.test", Role::Candidate, None).await;
        let job = db
            .jobs()
            .create(NewJob {
                title: "Backend Engineer".to_string(),
                description: "APIs".to_string(),
                location: None,
                work_style: None,
                skills: vec![],
                company_id: company.id.clone(),
                referrer_id: referrer.clone(),
                status: JobStatus::Active,
            })
            .await
            .unwrap();

        Fixture {
            db,
            company: company.id,
            referrer,
            candidate,
            job: job.id,
        }
    }

    fn apply(f: &Fixture) -> NewApplication {
        NewApplication {
            job_id: f.job.clone(),
            candidate_id: f.candidate.clone(),
            message: Some("Hello".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_copies_referrer_from_job() {
        let f = fixture().await;
        let app = f.db.applications().create(apply(&f)).await.unwrap();

        assert_eq!(app.status, ApplicationStatus::Applied);
        assert_eq!(app.referrer_id, f.referrer);
        assert_eq!(app.applied_at, app.updated_at);
    }

    #[tokio::test]
    async fn test_duplicate_application_rejected() {
        let f = fixture().await;
        let repo = f.db.applications();
        repo.create(apply(&f)).await.unwrap();
        let err = repo.create(apply(&f)).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_only_candidates_can_apply() {
        let f = fixture().await;
        let mut input = apply(&f);
        input.candidate_id = f.referrer.clone();
        let err = f.db.applications().create(input).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_closed_job_rejects_applications() {
        let f = fixture().await;
        f.db.jobs()
            .update(
                &f.job,
                JobPatch {
                    status: Some(JobStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let repo = f.db.applications();
        let err = repo.create(apply(&f)).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::invalid_state("Job is closed and not accepting applications")
        );
        assert!(repo.list_by_candidate(&f.candidate).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let f = fixture().await;
        let mut input = apply(&f);
        input.job_id = JobId::from("missing");
        let err = f.db.applications().create(input).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_listings_by_owner() {
        let f = fixture().await;
        let repo = f.db.applications();
        let app = repo.create(apply(&f)).await.unwrap();

        assert_eq!(repo.list_by_candidate(&f.candidate).await.unwrap(), vec![app.clone()]);
        assert_eq!(repo.list_by_referrer(&f.referrer).await.unwrap(), vec![app.clone()]);
        assert_eq!(repo.list_by_company(&f.company).await.unwrap(), vec![app]);
        assert!(repo
            .list_by_company(&CompanyId::from("other"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_status_stamps_time() {
        let f = fixture().await;
        let repo = f.db.applications();
        let app = repo.create(apply(&f)).await.unwrap();
        let later = app.applied_at + Duration::hours(1);

        let updated = repo
            .update_status(&app.id, ApplicationStatus::Interview, later)
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interview);
        assert_eq!(updated.updated_at, later);

        let (stored, job) = repo.get_with_job(&app.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(job.id, f.job);
    }

    #[tokio::test]
    async fn test_update_status_missing() {
        let f = fixture().await;
        let err = f
            .db
            .applications()
            .update_status(&ApplicationId::from("nope"), ApplicationStatus::Hired, Utc::now())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
