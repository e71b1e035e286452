//! applygate - profile-requirement eligibility gate for the careers portal.
//!
//! Owns the per-job requirement configuration, the pure eligibility
//! evaluator, and the REST surface the portal frontend talks to. Candidate
//! profiles live in an upstream service and are fetched per query.

pub mod auth;
pub mod database;
pub mod eligibility;
pub mod environment;
pub mod profile;
pub mod profile_client;
pub mod requirements;
pub mod web;

pub use database::{DatabaseConfig, JobProfileRequirements, RequirementRepository};
pub use eligibility::{evaluate, JobProfileEligibility, MIN_BIO_CHARS};
pub use environment::EnvironmentConfig;
pub use profile::CandidateProfile;
pub use requirements::{label_for, ProfileRequirementKey, RequirementGroup};
pub use web::start_web_server;
