// src/requirements.rs
//! Profile requirement keys - the per-job configurable profile sections

use serde::{Deserialize, Serialize};
use std::fmt;

/// One profile section a job may require before allowing an application.
///
/// Wire format is SCREAMING_SNAKE_CASE, matching the stored configuration
/// and the portal frontend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileRequirementKey {
    BasicPhone,
    BasicLocation,
    BasicTitle,
    BasicBio,
    Resume,
    Skills,
    Experience,
    Education,
    PersonalInfo,
    Clearances,
    Memberships,
    Publications,
    Courses,
    Referees,
    DocumentNationalId,
    DocumentAcademicCert,
    DocumentProfessionalCert,
}

/// Grouping used by the admin configuration screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementGroup {
    Basic,
    Core,
    Compliance,
    Documents,
}

impl ProfileRequirementKey {
    /// Every known key, in display order.
    pub const ALL: [ProfileRequirementKey; 17] = [
        Self::BasicPhone,
        Self::BasicLocation,
        Self::BasicTitle,
        Self::BasicBio,
        Self::Resume,
        Self::Skills,
        Self::Experience,
        Self::Education,
        Self::PersonalInfo,
        Self::Clearances,
        Self::Memberships,
        Self::Publications,
        Self::Courses,
        Self::Referees,
        Self::DocumentNationalId,
        Self::DocumentAcademicCert,
        Self::DocumentProfessionalCert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicPhone => "BASIC_PHONE",
            Self::BasicLocation => "BASIC_LOCATION",
            Self::BasicTitle => "BASIC_TITLE",
            Self::BasicBio => "BASIC_BIO",
            Self::Resume => "RESUME",
            Self::Skills => "SKILLS",
            Self::Experience => "EXPERIENCE",
            Self::Education => "EDUCATION",
            Self::PersonalInfo => "PERSONAL_INFO",
            Self::Clearances => "CLEARANCES",
            Self::Memberships => "MEMBERSHIPS",
            Self::Publications => "PUBLICATIONS",
            Self::Courses => "COURSES",
            Self::Referees => "REFEREES",
            Self::DocumentNationalId => "DOCUMENT_NATIONAL_ID",
            Self::DocumentAcademicCert => "DOCUMENT_ACADEMIC_CERT",
            Self::DocumentProfessionalCert => "DOCUMENT_PROFESSIONAL_CERT",
        }
    }

    /// Parse a raw key string as sent by clients or read back from storage.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == raw)
    }

    pub fn group(&self) -> RequirementGroup {
        match self {
            Self::BasicPhone | Self::BasicLocation | Self::BasicTitle | Self::BasicBio => {
                RequirementGroup::Basic
            }
            Self::Resume | Self::Skills | Self::Experience | Self::Education => {
                RequirementGroup::Core
            }
            Self::PersonalInfo
            | Self::Clearances
            | Self::Memberships
            | Self::Publications
            | Self::Courses
            | Self::Referees => RequirementGroup::Compliance,
            Self::DocumentNationalId
            | Self::DocumentAcademicCert
            | Self::DocumentProfessionalCert => RequirementGroup::Documents,
        }
    }

    /// Human-readable label for display. Total over the enum.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BasicPhone => "Phone number",
            Self::BasicLocation => "Location",
            Self::BasicTitle => "Professional title",
            Self::BasicBio => "Profile summary",
            Self::Resume => "Resume / CV",
            Self::Skills => "Skills",
            Self::Experience => "Work experience",
            Self::Education => "Education history",
            Self::PersonalInfo => "Personal information",
            Self::Clearances => "Statutory clearances",
            Self::Memberships => "Professional memberships",
            Self::Publications => "Publications",
            Self::Courses => "Short courses",
            Self::Referees => "Referees",
            Self::DocumentNationalId => "National ID document",
            Self::DocumentAcademicCert => "Academic certificate",
            Self::DocumentProfessionalCert => "Professional certificate",
        }
    }
}

impl fmt::Display for ProfileRequirementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a raw key string. Unknown keys fall back to the raw string so
/// a newer backend key still renders something usable.
pub fn label_for(raw: &str) -> String {
    match ProfileRequirementKey::parse(raw) {
        Some(key) => key.label().to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_nonempty_label() {
        for key in ProfileRequirementKey::ALL {
            assert!(!key.label().is_empty(), "missing label for {}", key);
        }
    }

    #[test]
    fn test_parse_round_trips_all_keys() {
        for key in ProfileRequirementKey::ALL {
            assert_eq!(ProfileRequirementKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(ProfileRequirementKey::parse("NOT_A_KEY"), None);
    }

    #[test]
    fn test_label_for_falls_back_to_raw_key() {
        assert_eq!(label_for("BASIC_PHONE"), "Phone number");
        assert_eq!(label_for("FUTURE_KEY"), "FUTURE_KEY");
    }

    #[test]
    fn test_wire_format_matches_as_str() {
        for key in ProfileRequirementKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_grouping_covers_expected_sections() {
        assert_eq!(
            ProfileRequirementKey::BasicBio.group(),
            RequirementGroup::Basic
        );
        assert_eq!(ProfileRequirementKey::Resume.group(), RequirementGroup::Core);
        assert_eq!(
            ProfileRequirementKey::Referees.group(),
            RequirementGroup::Compliance
        );
        assert_eq!(
            ProfileRequirementKey::DocumentNationalId.group(),
            RequirementGroup::Documents
        );
    }
}
