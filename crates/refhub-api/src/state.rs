//! Application state.

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{info, warn};

use refhub_store::{seed_demo_data, Database, DEMO_PASSWORD};

use crate::auth::TokenService;
use crate::config::ApiConfig;
use crate::services::{hash_password, ResumeStore};

/// Signing secret used outside production when `JWT_SECRET` is unset.
const DEV_JWT_SECRET: &str = "refhub-dev-secret";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub db: Database,
    pub tokens: Arc<TokenService>,
    pub resumes: ResumeStore,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let secret = match (&config.jwt_secret, config.is_production()) {
            (Some(secret), _) => secret.clone(),
            (None, true) => bail!("JWT_SECRET must be set in production"),
            (None, false) => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };
        let tokens = TokenService::new(secret.as_bytes(), config.token_ttl);

        let resumes = ResumeStore::new(config.upload_dir.clone(), config.max_resume_size);
        resumes
            .ensure_dir()
            .await
            .with_context(|| format!("Failed to create upload dir {}", config.upload_dir.display()))?;

        let db = Database::new();
        if config.seed_demo_data {
            let hash = hash_password(DEMO_PASSWORD.to_string())
                .await
                .context("Failed to hash demo password")?;
            let summary = seed_demo_data(&db, &hash)
                .await
                .context("Failed to seed demo data")?;
            info!(
                "Demo data loaded ({} users share password \"{}\")",
                summary.users, DEMO_PASSWORD
            );
        }

        Ok(Self {
            config,
            db,
            tokens: Arc::new(tokens),
            resumes,
        })
    }
}
