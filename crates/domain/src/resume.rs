//! Resume records and the backend's response envelopes.
//!
//! Shapes mirror the resume-analysis API's JSON: list/detail responses
//! wrap their payload in an envelope with a `status` field, skills are
//! grouped by category, and filtering returns enriched records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Skills grouped by category, e.g. `{"languages": ["Rust", "Python"]}`.
pub type SkillMap = BTreeMap<String, Vec<String>>;

/// A stored resume as returned by the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    /// Backend-assigned id.
    pub id: i64,
    /// Original upload file name.
    pub filename: String,
    /// Uploaded content type.
    pub file_type: String,
    /// Upload timestamp, as formatted by the backend.
    pub created_at: String,
    /// Flat list of extracted skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Full analysis payload for one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    /// Extracted skills grouped by category.
    pub skills: SkillMap,
    /// Plain text extracted from the document.
    pub extracted_text: String,
    /// Per-skill confidence scores in `[0, 1]`.
    #[serde(default)]
    pub confidence_scores: BTreeMap<String, f64>,
}

/// Criteria for the multi-criteria filter endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Required skills (any match).
    #[serde(default)]
    pub skills: Vec<String>,
    /// Accepted education levels.
    #[serde(default)]
    pub education_levels: Vec<String>,
    /// Minimum years of experience.
    pub min_experience: Option<u32>,
    /// Maximum years of experience.
    pub max_experience: Option<u32>,
}

/// One education entry on a filtered resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    /// Degree name.
    pub degree: String,
    /// Field of study.
    pub field: String,
    /// Awarding institution.
    pub institution: String,
    /// Graduation year.
    pub graduation_year: i32,
    /// Grade point average.
    #[serde(default)]
    pub gpa: Option<f64>,
}

/// A resume record enriched by the filter endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredResume {
    /// Backend-assigned id.
    pub id: i64,
    /// Original upload file name.
    pub filename: String,
    /// Upload timestamp, as formatted by the backend.
    pub created_at: String,
    /// Total years of experience.
    pub years_of_experience: f64,
    /// Highest education level.
    pub education_level: String,
    /// Extracted skills grouped by category.
    #[serde(default)]
    pub skills: SkillMap,
    /// Education history.
    #[serde(default)]
    pub education: Vec<Education>,
}

/// Response of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Backend status string.
    pub status: String,
    /// Human-readable outcome.
    pub message: String,
    /// Id assigned to the stored resume.
    pub resume_id: i64,
    /// Skills extracted during upload analysis.
    #[serde(default)]
    pub skills: SkillMap,
}

/// Envelope of the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeListEnvelope {
    /// Backend status string.
    pub status: String,
    /// The stored resumes.
    #[serde(default)]
    pub resumes: Vec<Resume>,
}

/// Envelope of the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDetailEnvelope {
    /// Backend status string.
    pub status: String,
    /// The requested resume.
    pub resume: Resume,
}

/// Response of the delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    /// Human-readable outcome.
    pub message: String,
}

/// Response of the filter endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Number of matching resumes.
    pub total: u64,
    /// The matching records.
    #[serde(default)]
    pub resumes: Vec<FilteredResume>,
}

/// Response of the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// The backend's answer text.
    pub answer: String,
}
