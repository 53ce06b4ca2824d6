//! The normalized record of one HTTP exchange with FluidDB.

/// Response header carrying the server-side error class.
pub const ERROR_CLASS_HEADER: &str = "X-FluidDB-Error-Class";

/// Response header carrying the server-side request id.
pub const REQUEST_ID_HEADER: &str = "X-FluidDB-Request-Id";

/// Media type used for raw tag values.
pub const VALUE_CONTENT_TYPE: &str = "application/vnd.fluiddb.value+json";

/// Immutable envelope around a single FluidDB response.
///
/// Built once per request by the connector. Error statuses (401, 404, ...)
/// are carried here like any other status; interpreting them is left to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    message: String,
    content_type: String,
    body: String,
    error_class: Option<String>,
    request_id: Option<String>,
}

impl Response {
    /// Create an envelope without error-class or request-id information.
    pub fn new(
        status: u16,
        message: impl Into<String>,
        content_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            content_type: content_type.into(),
            body: body.into(),
            error_class: None,
            request_id: None,
        }
    }

    /// Attach the server's error class.
    pub fn with_error_class(mut self, error_class: impl Into<String>) -> Self {
        self.error_class = Some(error_class.into());
        self
    }

    /// Attach the server's request id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// HTTP status code (e.g. 200, 404).
    pub fn status(&self) -> u16 {
        self.status
    }

    /// HTTP status message (e.g. "OK", "Not Found").
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The `Content-Type` the server declared.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Error class reported by the server, if any.
    pub fn error_class(&self) -> Option<&str> {
        self.error_class.as_deref()
    }

    /// Request id reported by the server, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns `true` when the content type can be parsed as JSON.
    ///
    /// Accepts `application/json` and any `+json` structured suffix such as
    /// the tag-value media type. Parameters (`; charset=...`) are ignored.
    pub fn is_json(&self) -> bool {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }
}
