//! Repository for companies.

use chrono::Utc;
use tracing::info;

use refhub_models::{Company, CompanyId, CompanyPatch, NewCompany, User, UserId};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};
use crate::metrics::record_operation;
use crate::sorting::newest_first;

const TABLE: &str = "companies";

/// Repository for companies.
#[derive(Clone)]
pub struct CompanyRepository {
    db: Database,
}

impl CompanyRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &CompanyId) -> StoreResult<Option<Company>> {
        Ok(self.db.read().await.companies.get(id).cloned())
    }

    /// All companies, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Company>> {
        let mut companies: Vec<Company> =
            self.db.read().await.companies.values().cloned().collect();
        newest_first(&mut companies, |c| (c.created_at, c.id.clone()));
        Ok(companies)
    }

    /// Create a company and link `admin` to it in one step.
    pub async fn create_with_admin(
        &self,
        input: NewCompany,
        admin: &UserId,
    ) -> StoreResult<(Company, User)> {
        let result = async {
            let mut tables = self.db.write().await;

            if !tables.users.contains_key(admin) {
                return Err(StoreError::invalid_reference(format!(
                    "user {} does not exist",
                    admin
                )));
            }

            let company = Company::new(input, Utc::now());
            tables.companies.insert(company.id.clone(), company.clone());

            let user = tables
                .users
                .get_mut(admin)
                .ok_or_else(|| StoreError::not_found("User", admin))?;
            user.company_id = Some(company.id.clone());

            info!("Created company {} with admin {}", company.id, admin);
            Ok((company, user.clone()))
        }
        .await;

        record_operation(TABLE, "create", &result);
        result
    }

    /// Merge a partial update into a company.
    pub async fn update(&self, id: &CompanyId, patch: CompanyPatch) -> StoreResult<Company> {
        let result = async {
            let mut tables = self.db.write().await;
            let company = tables
                .companies
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found("Company", id))?;
            company.apply(patch);
            Ok(company.clone())
        }
        .await;

        record_operation(TABLE, "update", &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refhub_models::{NewUser, Role};

    #[tokio::test]
    async fn test_create_links_admin() {
        let db = Database::new();
        let hr = db
            .users()
            .create(NewUser {
                email: "hr@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Hr,
                company_id: None,
            })
            .await
            .unwrap();

        let (company, user) = db
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

        assert_eq!(user.company_id, Some(company.id.clone()));
        let stored = db.users().get(&hr.id).await.unwrap().unwrap();
        assert_eq!(stored.company_id, Some(company.id.clone()));
        assert_eq!(db.companies().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_company() {
        let err = Database::new()
            .companies()
            .update(&CompanyId::from("nope"), CompanyPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
