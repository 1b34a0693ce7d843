//! Error types shared by the robot facade and the downloaders.

/// Errors raised by the robot facade and the remote services behind it.
#[derive(Debug, thiserror::Error)]
pub enum RobotError {
    /// The requested operation conflicts with the robot's current state.
    #[error("Cannot perform {operation}: {reason}")]
    InvalidOperation { operation: String, reason: String },
    /// A remote service reported a failure.
    #[error("Remote call to {service} failed: {message}")]
    Remote { service: String, message: String },
    /// A queued asynchronous call panicked or was aborted before completing.
    #[error("Asynchronous call did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl RobotError {
    pub fn invalid_operation(operation: &str, reason: &str) -> Self {
        Self::InvalidOperation {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn remote(service: &str, message: impl Into<String>) -> Self {
        Self::Remote {
            service: service.to_string(),
            message: message.into(),
        }
    }
}

/// Errors raised while fetching files over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The request failed or the server answered with a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Writing the response body to disk failed.
    #[error("Unable to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
