//! Shared table set.
//!
//! Each repository operation takes the lock exactly once, so a single
//! create/update is atomic with respect to the checks it performs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use refhub_models::{
    Application, ApplicationId, Company, CompanyId, Job, JobId, Profile, User, UserId,
};

use crate::{
    ApplicationRepository, CompanyRepository, JobRepository, ProfileRepository, UserRepository,
};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: HashMap<UserId, User>,
    /// Keyed by owning user
    pub profiles: HashMap<UserId, Profile>,
    pub companies: HashMap<CompanyId, Company>,
    pub jobs: HashMap<JobId, Job>,
    pub applications: HashMap<ApplicationId, Application>,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub users: usize,
    pub profiles: usize,
    pub companies: usize,
    pub jobs: usize,
    pub applications: usize,
}

/// Cloneable handle to the shared tables.
#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: Arc<RwLock<Tables>>,
}

impl Database {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.clone())
    }

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.clone())
    }

    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository::new(self.clone())
    }

    pub fn jobs(&self) -> JobRepository {
        JobRepository::new(self.clone())
    }

    pub fn applications(&self) -> ApplicationRepository {
        ApplicationRepository::new(self.clone())
    }

    /// Current row counts. Also serves as the readiness probe.
    pub async fn stats(&self) -> TableStats {
        let t = self.read().await;
        TableStats {
            users: t.users.len(),
            profiles: t.profiles.len(),
            companies: t.companies.len(),
            jobs: t.jobs.len(),
            applications: t.applications.len(),
        }
    }
}
