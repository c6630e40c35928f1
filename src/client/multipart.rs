use std::time::{SystemTime, UNIX_EPOCH};

/// A hand-built `multipart/form-data` body.
///
/// `ureq` has no multipart support, and the framing the service needs is
/// small: one file part, CRLF line endings, a closing boundary. Parts are
/// appended in call order; `finish` seals the body.
#[derive(Debug)]
pub(crate) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        // The boundary only has to be absent from the payload; a nanosecond
        // timestamp is distinct enough for CSV content.
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self::with_boundary(format!("pulsetui-{nanos:x}"))
    }

    pub(crate) fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Append one file part with the given form field name and filename.
    pub(crate) fn add_file_part(
        &mut self,
        field: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
    }

    /// The `Content-Type` header value to send alongside the body.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Seal the body with the closing boundary and return the bytes.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}
