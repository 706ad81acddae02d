//! Shared data models for the RefHub backend.
//!
//! This crate provides Serde-serializable types for:
//! - Users, roles and candidate profiles
//! - Companies and referral job postings
//! - Applications and their status workflow
//! - Role-based access rules shared by every mutating endpoint

pub mod access;
pub mod application;
pub mod company;
pub mod de;
pub mod error;
pub mod ids;
pub mod job;
pub mod profile;
pub mod user;

// Re-export common types
pub use access::{authorize, AccessDenied, Action, Actor};
pub use application::{Application, ApplicationStatus, NewApplication};
pub use company::{Company, CompanyPatch, NewCompany};
pub use error::ValidationError;
pub use ids::{ApplicationId, CompanyId, JobId, ProfileId, UserId};
pub use job::{Job, JobFilter, JobPatch, JobStatus, NewJob, WorkStyle};
pub use profile::{NewProfile, Profile, ProfilePatch};
pub use user::{NewUser, Role, User, UserSummary};
