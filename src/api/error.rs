//! Admin API errors
//!
//! Three kinds of failure reach a caller: guards that refuse to send an
//! ambiguous request, non-success responses from the server, and transport
//! failures where the server could not be reached at all.

use serde_json::Value;

/// Message carried by every non-success server response
pub const SERVER_RESPONSE_ERROR: &str = "server response error";

/// Failure of the underlying transport (connection refused, DNS, abort, ...)
#[derive(Debug, thiserror::Error)]
#[error("could not reach server: {source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            source: source.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err)
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        TransportError::new(err)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Raised locally before any network activity
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status
    #[error("{}", SERVER_RESPONSE_ERROR)]
    Response {
        status: u16,
        body: Option<Value>,
    },

    /// The server declared a JSON response that could not be parsed
    #[error("malformed response body")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    /// Shortcut method to create a validation (guard) error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AdminError::Validation(msg.into())
    }

    /// Human readable message to show to the operator
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn response_status_code(&self) -> Option<u16> {
        match self {
            AdminError::Response { status, .. } | AdminError::MalformedResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn response_body(&self) -> Option<&Value> {
        match self {
            AdminError::Response { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// True when the request never completed a round trip
    pub fn is_transport(&self) -> bool {
        matches!(self, AdminError::Transport(_))
    }
}

/// Format an admin error for display: the message, then status and body when present
pub fn format_admin_error(error: &AdminError) -> String {
    let mut out = error.message();

    if let Some(status) = error.response_status_code() {
        out.push_str(&format!("\nstatus: {}", status));
    }

    if let Some(body) = error.response_body() {
        let body = match body {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };
        out.push_str(&format!("\nbody: {}", body));
    }

    out
}
