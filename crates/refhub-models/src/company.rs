//! Companies.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::CompanyId;

/// Company hosting referrers and HR admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
}

impl Company {
    pub fn new(input: NewCompany, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CompanyId::new(),
            name: input.name,
            description: input.description,
            website: input.website,
            logo_url: input.logo_url,
            industry: input.industry,
            size: input.size,
            created_at,
        }
    }

    pub fn apply(&mut self, patch: CompanyPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
        if let Some(v) = patch.website {
            self.website = Some(v);
        }
        if let Some(v) = patch.logo_url {
            self.logo_url = Some(v);
        }
        if let Some(v) = patch.industry {
            self.industry = Some(v);
        }
        if let Some(v) = patch.size {
            self.size = Some(v);
        }
    }

    /// Case-insensitive industry match.
    pub fn in_industry(&self, industry: &str) -> bool {
        self.industry
            .as_deref()
            .is_some_and(|i| i.eq_ignore_ascii_case(industry))
    }
}
