//! Demo data for local development.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use refhub_models::{Company, CompanyId, Job, JobId, JobStatus, Role, User, UserId, WorkStyle};

use crate::database::Database;
use crate::error::{StoreError, StoreResult};

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password";

/// Rows inserted by [`seed_demo_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub companies: usize,
    pub users: usize,
    pub jobs: usize,
}

struct CompanySeed {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    website: &'static str,
    logo_url: &'static str,
    industry: &'static str,
    size: &'static str,
    created: (i32, u32, u32),
}

struct UserSeed {
    key: &'static str,
    email: &'static str,
    role: Role,
    company: Option<&'static str>,
}

struct JobSeed {
    title: &'static str,
    description: &'static str,
    location: &'static str,
    work_style: WorkStyle,
    skills: &'static [&'static str],
    company: &'static str,
    referrer: &'static str,
    created: (i32, u32, u32),
}

const COMPANIES: &[CompanySeed] = &[
    CompanySeed {
        key: "techcorp",
        name: "TechCorp Solutions",
        description: "Leading technology company specializing in web applications and cloud solutions.",
        website: "https://techcorp.com",
        logo_url: "https://via.placeholder.com/150x50/2563eb/ffffff?text=TechCorp",
        industry: "Technology",
        size: "500-1000 employees",
        created: (2023, 1, 1),
    },
    CompanySeed {
        key: "innovate",
        name: "Innovate Design Studio",
        description: "Creative design agency focused on user experience and digital innovation.",
        website: "https://innovatedesign.com",
        logo_url: "https://via.placeholder.com/150x50/059669/ffffff?text=Innovate",
        industry: "Design",
        size: "50-200 employees",
        created: (2023, 6, 1),
    },
    CompanySeed {
        key: "dataflow",
        name: "DataFlow Analytics",
        description: "Data science and analytics company helping businesses make data-driven decisions.",
        website: "https://dataflow.com",
        logo_url: "https://via.placeholder.com/150x50/d97706/ffffff?text=DataFlow",
        industry: "Analytics",
        size: "200-500 employees",
        created: (2024, 3, 1),
    },
];

const USERS: &[UserSeed] = &[
    UserSeed {
        key: "candidate",
        email: "test@example.com",
        role: Role::Candidate,
        company: None,
    },
    UserSeed {
        key: "hr",
        email: "hr@company.com",
        role: Role::Hr,
        company: Some("techcorp"),
    },
    UserSeed {
        key: "john",
        email: "john@techcorp.com",
        role: Role::Referrer,
        company: Some("techcorp"),
    },
    UserSeed {
        key: "sarah",
        email: "sarah@innovate.com",
        role: Role::Referrer,
        company: Some("innovate"),
    },
];

const JOBS: &[JobSeed] = &[
    JobSeed {
        title: "Senior Frontend Developer",
        description: "We're looking for a talented Frontend Developer to join our team and help build amazing user experiences. You'll work with React, TypeScript, and modern web technologies.",
        location: "San Francisco, CA",
        work_style: WorkStyle::Hybrid,
        skills: &["React", "TypeScript", "JavaScript", "CSS", "HTML"],
        company: "techcorp",
        referrer: "john",
        created: (2024, 1, 15),
    },
    JobSeed {
        title: "Backend Engineer",
        description: "Join our backend team to build scalable APIs and microservices. Experience with Node.js, Python, or Go is required.",
        location: "New York, NY",
        work_style: WorkStyle::Remote,
        skills: &["Node.js", "Python", "PostgreSQL", "AWS", "Docker"],
        company: "techcorp",
        referrer: "john",
        created: (2024, 1, 20),
    },
    JobSeed {
        title: "UX/UI Designer",
        description: "Create beautiful and intuitive user interfaces. You'll work closely with product managers and developers to bring designs to life.",
        location: "Austin, TX",
        work_style: WorkStyle::Onsite,
        skills: &["Figma", "Adobe Creative Suite", "User Research", "Prototyping"],
        company: "innovate",
        referrer: "sarah",
        created: (2024, 1, 25),
    },
    JobSeed {
        title: "Data Scientist",
        description: "Help us extract insights from large datasets and build machine learning models. Experience with Python, R, and statistical analysis required.",
        location: "Seattle, WA",
        work_style: WorkStyle::Hybrid,
        skills: &["Python", "R", "Machine Learning", "SQL", "Statistics"],
        company: "innovate",
        referrer: "sarah",
        created: (2024, 1, 30),
    },
    JobSeed {
        title: "DevOps Engineer",
        description: "Manage our cloud infrastructure and deployment pipelines. Experience with AWS, Kubernetes, and CI/CD required.",
        location: "Remote",
        work_style: WorkStyle::Remote,
        skills: &["AWS", "Kubernetes", "Docker", "Terraform", "Jenkins"],
        company: "techcorp",
        referrer: "john",
        created: (2024, 2, 1),
    },
    JobSeed {
        title: "Product Manager",
        description: "Lead product strategy and development. You'll work with cross-functional teams to deliver amazing products.",
        location: "Boston, MA",
        work_style: WorkStyle::Hybrid,
        skills: &["Product Strategy", "Agile", "User Research", "Analytics"],
        company: "dataflow",
        referrer: "sarah",
        created: (2024, 2, 5),
    },
    JobSeed {
        title: "Mobile Developer (iOS)",
        description: "Build native iOS applications using Swift and SwiftUI. Experience with iOS development and app store guidelines required.",
        location: "Los Angeles, CA",
        work_style: WorkStyle::Onsite,
        skills: &["Swift", "SwiftUI", "iOS", "Xcode", "Core Data"],
        company: "dataflow",
        referrer: "sarah",
        created: (2024, 2, 10),
    },
    JobSeed {
        title: "Full Stack Developer",
        description: "Work on both frontend and backend development. Experience with React, Node.js, and databases required.",
        location: "Chicago, IL",
        work_style: WorkStyle::Hybrid,
        skills: &["React", "Node.js", "MongoDB", "Express", "JavaScript"],
        company: "techcorp",
        referrer: "john",
        created: (2024, 2, 15),
    },
];

fn date((year, month, day): (i32, u32, u32)) -> StoreResult<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| StoreError::invalid_reference(format!("bad seed date {year}-{month}-{day}")))
}

fn lookup<'a, T>(keys: &'a [(&'static str, T)], key: &str) -> StoreResult<&'a T> {
    keys.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .ok_or_else(|| StoreError::invalid_reference(format!("unknown seed key {key}")))
}

/// Insert the demo companies, users and jobs.
///
/// `password_hash` is stored on every demo account; callers hash
/// [`DEMO_PASSWORD`] with their password scheme.
pub async fn seed_demo_data(db: &Database, password_hash: &str) -> StoreResult<SeedSummary> {
    let mut company_ids: Vec<(&'static str, CompanyId)> = Vec::new();
    let mut user_ids: Vec<(&'static str, UserId)> = Vec::new();

    let mut tables = db.write().await;

    for seed in COMPANIES {
        let company = Company {
            id: CompanyId::new(),
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            website: Some(seed.website.to_string()),
            logo_url: Some(seed.logo_url.to_string()),
            industry: Some(seed.industry.to_string()),
            size: Some(seed.size.to_string()),
            created_at: date(seed.created)?,
        };
        company_ids.push((seed.key, company.id.clone()));
        tables.companies.insert(company.id.clone(), company);
    }

    let accounts_created = date((2023, 1, 1))?;
    for seed in USERS {
        let company_id = match seed.company {
            Some(key) => Some(lookup(&company_ids, key)?.clone()),
            None => None,
        };
        let user = User {
            id: UserId::new(),
            email: seed.email.to_string(),
            password_hash: password_hash.to_string(),
            role: seed.role,
            company_id,
            verified: true,
            created_at: accounts_created,
        };
        user_ids.push((seed.key, user.id.clone()));
        tables.users.insert(user.id.clone(), user);
    }

    for seed in JOBS {
        let job = Job {
            id: JobId::new(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            location: Some(seed.location.to_string()),
            work_style: Some(seed.work_style),
            skills: seed.skills.iter().map(|s| s.to_string()).collect(),
            company_id: lookup(&company_ids, seed.company)?.clone(),
            referrer_id: lookup(&user_ids, seed.referrer)?.clone(),
            status: JobStatus::Active,
            created_at: date(seed.created)?,
        };
        tables.jobs.insert(job.id.clone(), job);
    }

    let summary = SeedSummary {
        companies: COMPANIES.len(),
        users: USERS.len(),
        jobs: JOBS.len(),
    };
    info!(
        "Seeded demo data: {} companies, {} users, {} jobs",
        summary.companies, summary.users, summary.jobs
    );
    Ok(summary)
}
