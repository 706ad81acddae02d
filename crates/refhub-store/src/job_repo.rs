//! Repository for referral job postings.

use chrono::Utc;
use tracing::info;

use refhub_models::{Job, JobFilter, JobId, JobPatch, NewJob, Role, UserId};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};
use crate::metrics::record_operation;
use crate::sorting::newest_first;

const TABLE: &str = "jobs";

/// Repository for jobs.
#[derive(Clone)]
pub struct JobRepository {
    db: Database,
}

impl JobRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &JobId) -> StoreResult<Option<Job>> {
        Ok(self.db.read().await.jobs.get(id).cloned())
    }

    /// List jobs matching `filter`, newest first.
    pub async fn list(&self, filter: &JobFilter) -> StoreResult<Vec<Job>> {
        let tables = self.db.read().await;
        let with_company = filter.needs_company();

        let mut jobs: Vec<Job> = tables
            .jobs
            .values()
            .filter(|job| {
                let company = if with_company {
                    tables.companies.get(&job.company_id)
                } else {
                    None
                };
                filter.matches(job, company)
            })
            .cloned()
            .collect();

        newest_first(&mut jobs, |j| (j.created_at, j.id.clone()));
        Ok(jobs)
    }

    /// Jobs posted by one referrer, newest first.
    pub async fn list_by_referrer(&self, referrer_id: &UserId) -> StoreResult<Vec<Job>> {
        let mut jobs: Vec<Job> = self
            .db
            .read()
            .await
            .jobs
            .values()
            .filter(|j| &j.referrer_id == referrer_id)
            .cloned()
            .collect();
        newest_first(&mut jobs, |j| (j.created_at, j.id.clone()));
        Ok(jobs)
    }

    /// Create a job. The referrer must exist with the referrer role and the
    /// company must exist.
    pub async fn create(&self, input: NewJob) -> StoreResult<Job> {
        let result = async {
            let mut tables = self.db.write().await;

            match tables.users.get(&input.referrer_id) {
                Some(user) if user.has_role(Role::Referrer) => {}
                Some(_) => {
                    return Err(StoreError::invalid_reference(format!(
                        "user {} is not a referrer",
                        input.referrer_id
                    )))
                }
                None => {
                    return Err(StoreError::invalid_reference(format!(
                        "user {} does not exist",
                        input.referrer_id
                    )))
                }
            }

            if !tables.companies.contains_key(&input.company_id) {
                return Err(StoreError::invalid_reference(format!(
                    "company {} does not exist",
                    input.company_id
                )));
            }

            let job = Job::new(input, Utc::now());
            tables.jobs.insert(job.id.clone(), job.clone());

            info!("Created job {} for company {}", job.id, job.company_id);
            Ok(job)
        }
        .await;

        record_operation(TABLE, "create", &result);
        result
    }

    /// Merge a partial update into a job.
    pub async fn update(&self, id: &JobId, patch: JobPatch) -> StoreResult<Job> {
        let result = async {
            let mut tables = self.db.write().await;
            let job = tables
                .jobs
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found("Job", id))?;
            job.apply(patch);
            Ok(job.clone())
        }
        .await;

        record_operation(TABLE, "update", &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refhub_models::{CompanyId, JobStatus, NewCompany, NewUser, WorkStyle};

    struct Fixture {
        db: Database,
        referrer: UserId,
        candidate: UserId,
        company: CompanyId,
    }

    async fn fixture() -> Fixture {
        let db = Database::new();
        let hr = db
            .users()
            .create(NewUser {
                email: "hr@acme.test".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Hr,
                company_id: None,
            })
            .await
            .unwrap();
        let (company, _) = db
            .companies()
            .create_with_admin(
                NewCompany {
                    name: "Acme".to_string(),
                    industry: Some("Technology".to_string()),
                    ..Default::default()
                },
                &hr.id,
            )
            .await
            .unwrap();
        let referrer = db
            .users()
            .create(NewUser {
                email: "ref@acme.test".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Referrer,
                company_id: Some(company.id.clone()),
            })
            .await
            .unwrap();
        let candidate = db
            .users()
            .create(NewUser {
                email: "cand@acme.test".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Candidate,
                company_id: None,
            })
            .await
            .unwrap();

        Fixture {
            db,
            referrer: referrer.id,
            candidate: candidate.id,
            company: company.id,
        }
    }

    fn new_job(f: &Fixture, title: &str, style: WorkStyle) -> NewJob {
        NewJob {
            title: title.to_string(),
            description: "Work on the platform".to_string(),
            location: Some("Remote".to_string()),
            work_style: Some(style),
            skills: vec!["Rust".to_string()],
            company_id: f.company.clone(),
            referrer_id: f.referrer.clone(),
            status: JobStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_requires_referrer() {
        let f = fixture().await;
        let mut input = new_job(&f, "Engineer", WorkStyle::Remote);
        input.referrer_id = f.candidate.clone();

        let err = f.db.jobs().create(input).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_create_requires_company() {
        let f = fixture().await;
        let mut input = new_job(&f, "Engineer", WorkStyle::Remote);
        input.company_id = CompanyId::from("missing");

        let err = f.db.jobs().create(input).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let f = fixture().await;
        let repo = f.db.jobs();
        let first = repo
            .create(new_job(&f, "Backend", WorkStyle::Remote))
            .await
            .unwrap();
        repo.create(new_job(&f, "Frontend", WorkStyle::Hybrid))
            .await
            .unwrap();
        let third = repo
            .create(new_job(&f, "Platform", WorkStyle::Remote))
            .await
            .unwrap();

        let remote = repo
            .list(&JobFilter {
                work_style: Some(WorkStyle::Remote),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(remote.len(), 2);
        assert!(remote.iter().all(|j| j.work_style == Some(WorkStyle::Remote)));
        assert!(remote[0].created_at >= remote[1].created_at);
        let ids: Vec<_> = remote.iter().map(|j| j.id.clone()).collect();
        assert!(ids.contains(&first.id) && ids.contains(&third.id));

        let by_industry = repo
            .list(&JobFilter {
                industry: Some("technology".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_industry.len(), 3);

        assert_eq!(repo.list_by_referrer(&f.referrer).await.unwrap().len(), 3);
        assert!(repo.list_by_referrer(&f.candidate).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let f = fixture().await;
        let repo = f.db.jobs();
        let job = repo
            .create(new_job(&f, "Backend", WorkStyle::Remote))
            .await
            .unwrap();

        let updated = repo
            .update(
                &job.id,
                JobPatch {
                    status: Some(JobStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, JobStatus::Closed);
        assert_eq!(updated.title, "Backend");
        assert!(repo
            .update(&JobId::from("nope"), JobPatch::default())
            .await
            .unwrap_err()
            .is_not_found());
    }
}
