//! Request description handed to the hook: url, method, body, headers.
//!
//! Defaults mirror the hook contract: `GET`, no body, no extra headers.

use std::path::Path;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};

use super::error::RequestError;

// =============================================================================
// FILE UPLOAD
// =============================================================================

/// In-memory file payload for multipart bodies (signup avatar, place image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime: mime.into(), bytes }
    }

    /// Read a file from disk, inferring the mime type from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let mime = mime_for_extension(path.extension().and_then(|e| e.to_str()));
        Ok(Self { file_name, mime: mime.to_string(), bytes })
    }
}

fn mime_for_extension(ext: Option<&str>) -> &'static str {
    match ext.map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// BODY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartField {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<MultipartField>),
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { url: url.into(), method, body: RequestBody::Empty, headers: Vec::new() }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    #[must_use]
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Append a text part, switching the body to multipart if needed.
    #[must_use]
    pub fn text_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_part(MultipartField::Text { name: name.into(), value: value.into() });
        self
    }

    /// Append a file part, switching the body to multipart if needed.
    #[must_use]
    pub fn file_field(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.push_part(MultipartField::File { name: name.into(), file });
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION.as_str(), format!("Bearer {token}"))
    }

    fn push_part(&mut self, field: MultipartField) {
        let mut fields = match std::mem::take(&mut self.body) {
            RequestBody::Multipart(fields) => fields,
            RequestBody::Empty | RequestBody::Json(_) => Vec::new(),
        };
        fields.push(field);
        self.body = RequestBody::Multipart(fields);
    }

    /// Translate into a `reqwest` builder, validating headers eagerly so bad
    /// input surfaces as `InvalidRequest` rather than a transport error.
    pub(crate) fn into_builder(self, http: &reqwest::Client) -> Result<reqwest::RequestBuilder, RequestError> {
        let mut builder = http.request(self.method, &self.url);

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RequestError::InvalidRequest(format!("header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RequestError::InvalidRequest(format!("header value for '{name}': {e}")))?;
            builder = builder.header(name, value);
        }

        builder = match self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };

        Ok(builder)
    }
}

fn build_form(fields: Vec<MultipartField>) -> Result<Form, RequestError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name, value),
            MultipartField::File { name, file } => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)
                    .map_err(|e| RequestError::InvalidRequest(format!("mime for '{name}': {e}")))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
