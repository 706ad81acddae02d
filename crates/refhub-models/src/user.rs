//! User accounts and roles.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{CompanyId, UserId};

/// Marketplace role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Job seeker browsing postings and applying.
    Candidate,
    /// Company employee posting referral openings.
    Referrer,
    /// Company admin managing applications.
    Hr,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Referrer => "referrer",
            Role::Hr => "hr",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored user record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Argon2 PHC string, never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

/// Public view of a user returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            company_id: user.company_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_form_is_lowercase() {
        assert_eq!(serde_json::from_str::<Role>("\"hr\"").unwrap(), Role::Hr);
        assert!(serde_json::from_str::<Role>("\"HR\"").is_err());
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
        assert_eq!(Role::Referrer.to_string(), "referrer");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: UserId::from("u1"),
            email: "a@b.com".to_string(),
            password_hash: "secret".to_string(),
            role: Role::Referrer,
            company_id: Some(CompanyId::from("c1")),
            verified: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "referrer");
        assert_eq!(json["companyId"], "c1");
    }
}
