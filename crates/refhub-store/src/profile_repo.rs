//! Repository for candidate profiles.

use refhub_models::{NewProfile, Profile, ProfilePatch, UserId};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};
use crate::metrics::record_operation;

const TABLE: &str = "profiles";

/// Repository for profiles, one per user.
#[derive(Clone)]
pub struct ProfileRepository {
    db: Database,
}

impl ProfileRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get the profile owned by a user.
    pub async fn get_by_user(&self, user_id: &UserId) -> StoreResult<Option<Profile>> {
        Ok(self.db.read().await.profiles.get(user_id).cloned())
    }

    /// Create a user's profile.
    pub async fn create(&self, user_id: &UserId, input: NewProfile) -> StoreResult<Profile> {
        let result = async {
            let mut tables = self.db.write().await;

            if !tables.users.contains_key(user_id) {
                return Err(StoreError::invalid_reference(format!(
                    "user {} does not exist",
                    user_id
                )));
            }
            if tables.profiles.contains_key(user_id) {
                return Err(StoreError::already_exists("Profile already exists"));
            }

            let profile = Profile::new(user_id.clone(), input);
            tables.profiles.insert(user_id.clone(), profile.clone());
            Ok(profile)
        }
        .await;

        record_operation(TABLE, "create", &result);
        result
    }

    /// Merge a partial update into a user's profile.
    pub async fn update(&self, user_id: &UserId, patch: ProfilePatch) -> StoreResult<Profile> {
        let result = async {
            let mut tables = self.db.write().await;
            let profile = tables
                .profiles
                .get_mut(user_id)
                .ok_or_else(|| StoreError::not_found("Profile", user_id))?;
            profile.apply(patch);
            Ok(profile.clone())
        }
        .await;

        record_operation(TABLE, "update", &result);
        result
    }
}
