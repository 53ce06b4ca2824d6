//! Error types for the FluidDB client.

use crate::response::Response;

/// Result type alias for FluidDB operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to FluidDB.
///
/// Ordinary HTTP failure statuses are not errors at the connector level;
/// they become [`Error::Api`] only once a caller states which status it
/// expected and the server answered with another.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request never produced a usable response (DNS, refused
    /// connection, TLS failure, timeout before headers, ...).
    #[error("Transport error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
        /// Underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a status other than the expected one.
    #[error("{}", api_message(.status, .message, .error_class, .request_id))]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// HTTP status message (e.g. "Unauthorized")
        message: String,
        /// Value of the `X-FluidDB-Error-Class` response header
        error_class: Option<String>,
        /// Value of the `X-FluidDB-Request-Id` response header
        request_id: Option<String>,
    },

    /// The response (or a path) did not have the expected shape.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (configuration and credential files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn api_message(
    status: &u16,
    message: &str,
    error_class: &Option<String>,
    request_id: &Option<String>,
) -> String {
    let mut text = format!("FluidDB returned the following error: {status} ({message})");
    if let Some(class) = error_class {
        text.push(' ');
        text.push_str(class);
    }
    if let Some(id) = request_id {
        text.push_str(" - with the request ID: ");
        text.push_str(id);
    }
    text
}

impl Error {
    /// Creates a new transport error with a message and source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Creates an API error from the fields of a response envelope.
    pub fn api_from_response(response: &Response) -> Self {
        Error::Api {
            status: response.status(),
            message: response.message().to_string(),
            error_class: response.error_class().map(str::to_string),
            request_id: response.request_id().map(str::to_string),
        }
    }

    /// Creates a new format error.
    pub fn format<S: Into<String>>(message: S) -> Self {
        Error::Format(message.into())
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns `true` if no response could be recovered from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// The HTTP status carried by an [`Error::Api`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for an API error with status 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` for an API error with status 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
