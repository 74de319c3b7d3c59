//! Resume API surface.
//!
//! Thin operations over [`ApiClient`], one per backend endpoint, plus
//! the classifier short-circuit for chat questions and the client-side
//! skill aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;
use vitae_domain::{
    ApiRequest, ChatAnswer, DeleteReceipt, FilterCriteria, FilterOutcome, Resume,
    ResumeDetailEnvelope, ResumeListEnvelope, SkillMap, UploadReceipt, canned_response,
    is_in_scope, responses, validate_upload,
};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::ports::{HttpTransport, IdentityProvider, Navigator};

/// Client-side service for the resume endpoints.
pub struct ResumeService<T, P, N> {
    client: Arc<ApiClient<T, P, N>>,
}

impl<T, P, N> ResumeService<T, P, N>
where
    T: HttpTransport,
    P: IdentityProvider,
    N: Navigator,
{
    /// Creates the service on top of an authenticated client.
    pub const fn new(client: Arc<ApiClient<T, P, N>>) -> Self {
        Self { client }
    }

    /// Uploads a resume for analysis.
    ///
    /// The file is validated locally (size and content type) before any
    /// bytes are sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unacceptable files, or any
    /// [`crate::ApiError`] from the request itself.
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<UploadReceipt> {
        validate_upload(file_name, content_type, bytes.len() as u64)?;

        tracing::info!(file = file_name, size = bytes.len(), "uploading resume");
        let request =
            ApiRequest::multipart("/api/resumes/upload", "file", file_name, content_type, bytes);
        self.client.send_json(request).await
    }

    /// Lists all stored resumes.
    ///
    /// # Errors
    ///
    /// Returns any [`crate::ApiError`] from the request.
    pub async fn list(&self) -> ApiResult<Vec<Resume>> {
        let envelope: ResumeListEnvelope = self
            .client
            .send_json(ApiRequest::get("/api/resumes/list"))
            .await?;
        Ok(envelope.resumes)
    }

    /// Fetches one resume.
    ///
    /// # Errors
    ///
    /// Returns any [`crate::ApiError`] from the request.
    pub async fn detail(&self, id: i64) -> ApiResult<Resume> {
        let envelope: ResumeDetailEnvelope = self
            .client
            .send_json(ApiRequest::get(format!("/api/resumes/{id}")))
            .await?;
        Ok(envelope.resume)
    }

    /// Fetches the categorized skills of one resume.
    ///
    /// # Errors
    ///
    /// Returns any [`crate::ApiError`] from the request.
    pub async fn skills(&self, id: i64) -> ApiResult<SkillMap> {
        self.client
            .send_json(ApiRequest::get(format!("/api/resumes/{id}/skills")))
            .await
    }

    /// Deletes a resume; returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns any [`crate::ApiError`] from the request.
    pub async fn delete(&self, id: i64) -> ApiResult<String> {
        let receipt: DeleteReceipt = self
            .client
            .send_json(ApiRequest::delete(format!("/api/resumes/{id}")))
            .await?;
        Ok(receipt.message)
    }

    /// Filters resumes by multi-criteria query.
    ///
    /// # Errors
    ///
    /// Returns any [`crate::ApiError`] from the request.
    pub async fn filter(&self, criteria: &FilterCriteria) -> ApiResult<FilterOutcome> {
        let body = serde_json::to_value(criteria)
            .map_err(|e| crate::ApiError::Decode(e.to_string()))?;
        self.client
            .send_json(ApiRequest::post("/api/resumes/filter", body))
            .await
    }

    /// Answers a free-text question.
    ///
    /// The common intents (greetings, feature questions, and the like)
    /// and out-of-scope questions are answered locally from fixed
    /// responses; everything else is forwarded to the backend,
    /// optionally scoped to one resume.
    ///
    /// # Errors
    ///
    /// Returns any [`crate::ApiError`] from the forwarded request.
    pub async fn ask(&self, question: &str, resume_id: Option<i64>) -> ApiResult<String> {
        // Intent match comes first: a plain "hello" carries no career
        // keyword but still deserves the greeting, not the scope notice.
        if let Some(canned) = canned_response(question) {
            return Ok(canned.to_string());
        }
        if !is_in_scope(question) {
            return Ok(responses::OUT_OF_SCOPE.to_string());
        }

        let mut body = json!({ "question": question });
        if let Some(id) = resume_id {
            body["resume_id"] = json!(id);
        }
        let answer: ChatAnswer = self
            .client
            .send_json(ApiRequest::post("/api/chat/ask", body))
            .await?;
        Ok(answer.answer)
    }

    /// Aggregates per-skill counts across all stored resumes.
    ///
    /// Fetches the list and then each resume's skills; an explicit,
    /// on-demand aggregation rather than a side effect of mutations.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::ApiError`] hit while fetching.
    pub async fn skill_distribution(&self) -> ApiResult<BTreeMap<String, usize>> {
        let resumes = self.list().await?;

        let mut counts = BTreeMap::new();
        for resume in resumes {
            let skills = self.skills(resume.id).await?;
            for skill in skills.values().flatten() {
                *counts.entry(skill.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}
