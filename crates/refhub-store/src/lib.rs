//! Relational-style storage for RefHub.
//!
//! This crate provides:
//! - An in-process table set shared behind a single async lock
//! - Typed repositories for users, profiles, companies, jobs and applications
//! - Reference checks for the cross-entity invariants
//! - Newest-first ordering helpers
//! - Demo seed data

pub mod application_repo;
pub mod company_repo;
pub mod database;
pub mod error;
pub mod job_repo;
pub mod metrics;
pub mod profile_repo;
pub mod seed;
pub mod sorting;
pub mod user_repo;

pub use application_repo::ApplicationRepository;
pub use company_repo::CompanyRepository;
pub use database::{Database, TableStats};
pub use error::{StoreError, StoreResult};
pub use job_repo::JobRepository;
pub use profile_repo::ProfileRepository;
pub use seed::{seed_demo_data, SeedSummary, DEMO_PASSWORD};
pub use user_repo::UserRepository;
