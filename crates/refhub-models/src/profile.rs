//! Candidate profiles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{ProfileId, UserId};

/// Profile attached to a user (at most one per user).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub full_name: String,
    pub resume_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Years of experience
    pub experience: Option<u32>,
    pub education: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
}

/// Input for creating a profile.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub full_name: String,
    pub resume_url: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<u32>,
    pub education: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
}

/// Partial profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<u32>,
    pub education: Option<String>,
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
}

impl Profile {
    /// Build a new profile for a user.
    pub fn new(user_id: UserId, input: NewProfile) -> Self {
        Self {
            id: ProfileId::new(),
            user_id,
            full_name: input.full_name,
            resume_url: input.resume_url,
            skills: input.skills,
            experience: input.experience,
            education: input.education,
            portfolio_url: input.portfolio_url,
            bio: input.bio,
        }
    }

    /// Merge a partial update into this profile.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(v) = patch.full_name {
            self.full_name = v;
        }
        if let Some(v) = patch.resume_url {
            self.resume_url = Some(v);
        }
        if let Some(v) = patch.skills {
            self.skills = v;
        }
        if let Some(v) = patch.experience {
            self.experience = Some(v);
        }
        if let Some(v) = patch.education {
            self.education = Some(v);
        }
        if let Some(v) = patch.portfolio_url {
            self.portfolio_url = Some(v);
        }
        if let Some(v) = patch.bio {
            self.bio = Some(v);
        }
    }
}
