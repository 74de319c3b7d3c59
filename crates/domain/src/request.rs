//! Outgoing API request description.
//!
//! Services build an [`ApiRequest`] with a path relative to the backend
//! base URL; the request coordinator resolves the path and attaches the
//! bearer credential before handing the request to a transport adapter.

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// DELETE request.
    Delete,
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON payload, sent as `application/json`.
    Json(serde_json::Value),
    /// A single file part, sent as `multipart/form-data`.
    Multipart {
        /// Form field name.
        field: String,
        /// Original file name.
        file_name: String,
        /// Content type of the file.
        content_type: String,
        /// File contents.
        bytes: Vec<u8>,
    },
}

impl RequestBody {
    /// Returns true if there is no payload.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An outgoing request to the backend API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path. Services set a path relative to the base URL
    /// (`/api/...`); the coordinator rewrites it to an absolute URL
    /// before dispatch, so transport adapters always see absolute URLs.
    pub path: String,
    /// Request body.
    pub body: RequestBody,
    /// Bearer token attached by the coordinator. Never set by services.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: RequestBody::Json(body),
            bearer: None,
        }
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    /// Creates a multipart POST request carrying one file.
    #[must_use]
    pub fn multipart(
        path: impl Into<String>,
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: RequestBody::Multipart {
                field: field.into(),
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes,
            },
            bearer: None,
        }
    }

    /// Returns the request with the given bearer token attached (or
    /// detached, when `None`).
    #[must_use]
    pub fn with_bearer(mut self, bearer: Option<String>) -> Self {
        self.bearer = bearer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let request = ApiRequest::get("/api/resumes/list");
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.body.is_empty());
        assert!(request.bearer.is_none());

        let request = ApiRequest::post("/api/chat/ask", serde_json::json!({"question": "hi"}));
        assert_eq!(request.method, HttpMethod::Post);
        assert!(!request.body.is_empty());

        let request = ApiRequest::delete("/api/resumes/7");
        assert_eq!(request.method, HttpMethod::Delete);
    }

    #[test]
    fn test_with_bearer_replaces_token() {
        let request = ApiRequest::get("/api/resumes/list")
            .with_bearer(Some("stale".to_string()))
            .with_bearer(Some("fresh".to_string()));
        assert_eq!(request.bearer.as_deref(), Some("fresh"));
    }
}
