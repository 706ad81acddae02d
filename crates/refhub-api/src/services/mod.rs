//! Business services used by the handlers.

pub mod password;
pub mod uploads;

pub use password::{hash_password, verify_password};
pub use uploads::{ResumeStore, StoredResume, UPLOADS_PREFIX};
