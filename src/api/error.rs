use thiserror::Error;

/// Why an analysis submission failed.
///
/// `Display` is the exact text shown to the user, so variants format as
/// their message with no extra prefix.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service answered with a non-success status. `message` is the
    /// response body, or `HTTP <code>` when the body was empty.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The request could not be completed, or its body could not be read.
    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

impl AnalysisError {
    pub fn http(status: u16, body: String) -> Self {
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };
        AnalysisError::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Http { status, .. } => Some(*status),
            AnalysisError::Network(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
