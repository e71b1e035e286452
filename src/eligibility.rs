// src/eligibility.rs
//! Profile-requirement eligibility evaluator.
//!
//! Pure function over (requirement set, candidate profile). Fetching either
//! input and deciding what to do when a fetch fails happens at the web
//! boundary; see `web::handlers::eligibility_handlers`.

use crate::profile::{CandidateProfile, DocumentCategory};
use crate::requirements::ProfileRequirementKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Minimum bio length, in characters, for `BASIC_BIO` to count as filled.
pub const MIN_BIO_CHARS: usize = 50;

/// Derived eligibility snapshot for one (job, candidate) pair.
///
/// Invariants: `completed_count + missing_keys.len() == total_required`, and
/// `is_eligible` holds exactly when `missing_keys` is empty. A job with no
/// configured requirements is trivially eligible at 100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProfileEligibility {
    pub is_eligible: bool,
    pub completed_count: usize,
    pub total_required: usize,
    pub missing_keys: Vec<ProfileRequirementKey>,
    pub completion_percentage: u8,
}

impl JobProfileEligibility {
    /// Snapshot for a job with no active gate. Also the documented fail-open
    /// result when the requirement set or profile cannot be fetched: a
    /// transient check failure must never block the apply action.
    pub fn gate_inactive() -> Self {
        Self {
            is_eligible: true,
            completed_count: 0,
            total_required: 0,
            missing_keys: Vec::new(),
            completion_percentage: 100,
        }
    }
}

/// Evaluate one candidate profile against one job's requirement set.
pub fn evaluate(
    requirement_keys: &BTreeSet<ProfileRequirementKey>,
    profile: &CandidateProfile,
) -> JobProfileEligibility {
    if requirement_keys.is_empty() {
        return JobProfileEligibility::gate_inactive();
    }

    let total_required = requirement_keys.len();
    let missing_keys: Vec<ProfileRequirementKey> = requirement_keys
        .iter()
        .copied()
        .filter(|key| !satisfies(*key, profile))
        .collect();

    let completed_count = total_required - missing_keys.len();
    let completion_percentage =
        ((completed_count as f64 / total_required as f64) * 100.0).round() as u8;

    JobProfileEligibility {
        is_eligible: missing_keys.is_empty(),
        completed_count,
        total_required,
        missing_keys,
        completion_percentage,
    }
}

/// Per-key predicate dispatch. Kept in one place so the rules stay
/// centrally testable and independent of the web layer.
fn satisfies(key: ProfileRequirementKey, profile: &CandidateProfile) -> bool {
    use ProfileRequirementKey::*;

    match key {
        BasicPhone => has_text(profile.phone.as_deref()),
        BasicLocation => has_text(profile.location.as_deref()),
        BasicTitle => has_text(profile.professional_title.as_deref()),
        BasicBio => profile
            .bio
            .as_deref()
            .is_some_and(|bio| bio.trim().chars().count() >= MIN_BIO_CHARS),
        Resume => !profile.resumes.is_empty(),
        Skills => !profile.skills.is_empty(),
        Experience => !profile.experience.is_empty(),
        Education => !profile.education.is_empty(),
        PersonalInfo => profile
            .personal_info
            .as_ref()
            .is_some_and(|info| info.is_complete()),
        Clearances => !profile.clearances.is_empty(),
        Memberships => !profile.memberships.is_empty(),
        Publications => !profile.publications.is_empty(),
        Courses => !profile.courses.is_empty(),
        Referees => !profile.referees.is_empty(),
        DocumentNationalId => has_document(profile, DocumentCategory::NationalId),
        DocumentAcademicCert => has_document(profile, DocumentCategory::AcademicCertificate),
        DocumentProfessionalCert => {
            has_document(profile, DocumentCategory::ProfessionalCertificate)
        }
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn has_document(profile: &CandidateProfile, category: DocumentCategory) -> bool {
    profile.documents.iter().any(|doc| doc.category == category)
}
