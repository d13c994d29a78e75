use thiserror::Error;

/// Error reported by a repository backend.
///
/// The dispatcher hands the first one it sees back to the caller unchanged.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("search task for {0} ended without a result")]
    TaskAborted(String),
}

impl BackendError {
    /// HTTP status of a remote failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BackendError::TaskAborted("core".to_string());
        assert_eq!(err.to_string(), "search task for core ended without a result");
        assert_eq!(err.status(), None);

        let err = BackendError::Remote {
            status: 502,
            message: "index unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "index unavailable");
        assert_eq!(err.status(), Some(502));
    }
}
