//! Appliance client error type

use thiserror::Error;

/// Errors from the appliance REST collaborator.
///
/// Session establishment failures are fatal to the run; everything else is
/// reported per query and processing continues with the remaining paths.
#[derive(Debug, Error)]
pub enum ApplianceError {
    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The appliance answered with a non-success status.
    #[error("appliance returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The login response carried no CSRF token, so mutating requests
    /// cannot be issued.
    #[error("login response did not include a CSRF token")]
    MissingCsrfToken,

    /// A query succeeded but returned no entries.
    #[error("appliance response contained no entries")]
    EmptyResponse,
}

impl ApplianceError {
    /// Build an API error from a response status and body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let mut message = body.into();
        if message.is_empty() {
            message = "(empty body)".to_string();
        }
        Self::Api { status, message }
    }
}
