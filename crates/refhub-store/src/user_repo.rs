//! Repository for user accounts.

use chrono::Utc;
use tracing::info;

use refhub_models::{NewUser, User, UserId};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};
use crate::metrics::record_operation;

const TABLE: &str = "users";

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.db.read().await.users.get(id).cloned())
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.db.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    /// Create a user. Emails are unique and `company_id` must exist.
    pub async fn create(&self, input: NewUser) -> StoreResult<User> {
        let result = self.create_inner(input).await;
        record_operation(TABLE, "create", &result);
        result
    }

    async fn create_inner(&self, input: NewUser) -> StoreResult<User> {
        let mut tables = self.db.write().await;

        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(StoreError::already_exists("User already exists"));
        }

        if let Some(company_id) = &input.company_id {
            if !tables.companies.contains_key(company_id) {
                return Err(StoreError::invalid_reference(format!(
                    "company {} does not exist",
                    company_id
                )));
            }
        }

        let user = User {
            id: UserId::new(),
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            company_id: input.company_id,
            verified: true,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id.clone(), user.clone());

        info!("Created user {} ({})", user.id, user.role);
        Ok(user)
    }
}
