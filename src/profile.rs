// src/profile.rs
//! Candidate profile snapshot as served by the upstream profile service.
//!
//! Every field is defaulted so a partially filled profile still
//! deserializes; the evaluator treats absent data as unsatisfied.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateProfile {
    pub phone: Option<String>,
    pub location: Option<String>,
    pub professional_title: Option<String>,
    pub bio: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub resumes: Vec<ResumeRecord>,
    pub skills: Vec<Skill>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub clearances: Vec<ClearanceRecord>,
    pub memberships: Vec<MembershipRecord>,
    pub publications: Vec<PublicationRecord>,
    pub courses: Vec<CourseRecord>,
    pub referees: Vec<RefereeRecord>,
    pub documents: Vec<DocumentRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub date_of_birth: Option<NaiveDate>,
    pub id_number: Option<String>,
    pub nationality: Option<String>,
    pub county: Option<String>,
}

impl PersonalInfo {
    /// All mandatory sub-fields populated.
    pub fn is_complete(&self) -> bool {
        self.date_of_birth.is_some()
            && self.id_number.as_deref().is_some_and(|v| !v.trim().is_empty())
            && self.nationality.as_deref().is_some_and(|v| !v.trim().is_empty())
            && self.county.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeRecord {
    pub file_name: String,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub proficiency: Option<String>,
    pub years: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub employer: String,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub award: Option<String>,
    pub completed_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClearanceRecord {
    pub issuer: String,
    pub reference: Option<String>,
    pub issued_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MembershipRecord {
    pub body: String,
    pub member_number: Option<String>,
    pub good_standing: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicationRecord {
    pub title: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseRecord {
    pub title: String,
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefereeRecord {
    pub name: String,
    pub contact: Option<String>,
    pub organization: Option<String>,
}

/// Category tag on uploaded documents. Unknown categories from a newer
/// backend deserialize as `Other` rather than failing the whole profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentCategory {
    NationalId,
    AcademicCertificate,
    ProfessionalCertificate,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub category: DocumentCategory,
    pub file_name: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_deserializes() {
        let profile: CandidateProfile =
            serde_json::from_str(r#"{"phone": "+254700000000"}"#).unwrap();
        assert_eq!(profile.phone.as_deref(), Some("+254700000000"));
        assert!(profile.skills.is_empty());
        assert!(profile.personal_info.is_none());
    }

    #[test]
    fn test_unknown_document_category_maps_to_other() {
        let doc: DocumentRecord = serde_json::from_str(
            r#"{"category": "DRIVING_LICENSE", "fileName": "dl.pdf"}"#,
        )
        .unwrap();
        assert_eq!(doc.category, DocumentCategory::Other);
    }

    #[test]
    fn test_personal_info_completeness() {
        let mut info = PersonalInfo {
            date_of_birth: Some(NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()),
            id_number: Some("12345678".to_string()),
            nationality: Some("Kenyan".to_string()),
            county: Some("Nairobi".to_string()),
        };
        assert!(info.is_complete());

        info.county = Some("   ".to_string());
        assert!(!info.is_complete());

        info.county = None;
        assert!(!info.is_complete());
    }
}
