//! Vitae Domain - Core business types
//!
//! This crate defines the domain model for the Vitae resume-analysis
//! client. All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod chat;
pub mod error;
pub mod id;
pub mod notification;
pub mod request;
pub mod response;
pub mod resume;
pub mod upload;

pub use auth::{AuthError, Credential, UserProfile};
pub use chat::{ChatIntent, canned_response, classify, is_in_scope, responses};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use notification::{Notification, NotificationAction, NotificationKind};
pub use request::{ApiRequest, HttpMethod, RequestBody};
pub use response::ApiResponse;
pub use resume::{
    ChatAnswer, DeleteReceipt, Education, FilterCriteria, FilterOutcome, FilteredResume, Resume,
    ResumeAnalysis, ResumeDetailEnvelope, ResumeListEnvelope, SkillMap, UploadReceipt,
};
pub use upload::{ALLOWED_CONTENT_TYPES, MAX_UPLOAD_BYTES, format_file_size, validate_upload};
