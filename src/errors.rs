use thiserror::Error;

/// Failure stage of a fetch-and-parse cycle, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureStage {
    /// Request never produced an HTTP response
    Transport,
    /// Server answered with a non-success status
    HttpStatus,
    /// Body could not be turned into movies
    ResponseParsing,
    /// Server answered successfully with nothing in it
    EmptyBody,
    /// Local configuration is missing or unreadable
    Configuration,
    /// A background search task died before finishing
    Task,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FailureStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            FailureStage::Transport => "Transport",
            FailureStage::HttpStatus => "HTTP Status",
            FailureStage::ResponseParsing => "Response Parsing",
            FailureStage::EmptyBody => "Empty Body",
            FailureStage::Configuration => "Configuration",
            FailureStage::Task => "Background Task",
        }
    }

    /// Get actionable suggestion for fixing the issue at this stage
    pub fn suggestion(&self) -> &'static str {
        match self {
            FailureStage::Transport => "Check your internet connection and try again.",
            FailureStage::HttpStatus => {
                "The catalog service rejected the request. Verify the access token and try again later."
            }
            FailureStage::ResponseParsing => {
                "The catalog service returned data in an unexpected shape. Try again later."
            }
            FailureStage::EmptyBody => "Keep typing or resubmit the query.",
            FailureStage::Configuration => {
                "Set TMDB_ACCESS_TOKEN or add an access_token to config.json."
            }
            FailureStage::Task => "This is a bug; rerun with --log-level debug and report it.",
        }
    }
}

/// Errors raised while searching the movie catalog
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    /// Transport failure or non-success HTTP status
    #[error("{}", network_summary(.status, .message))]
    Network { status: Option<u16>, message: String },

    /// Malformed or schema-mismatched response body
    #[error("Failed to parse response: {reason}")]
    Parse { reason: String },

    /// The call succeeded but returned no usable body
    #[error("Empty response body")]
    EmptyResponse,

    /// Missing or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A spawned fetch cycle panicked or was aborted
    #[error("Search task failed: {0}")]
    Task(String),
}

fn network_summary(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Server returned {}: {}", code, message),
        None => format!("Request failed: {}", message),
    }
}

impl CatalogError {
    pub fn stage(&self) -> FailureStage {
        match self {
            CatalogError::Network { status: None, .. } => FailureStage::Transport,
            CatalogError::Network { .. } => FailureStage::HttpStatus,
            CatalogError::Parse { .. } => FailureStage::ResponseParsing,
            CatalogError::EmptyResponse => FailureStage::EmptyBody,
            CatalogError::Config(_) => FailureStage::Configuration,
            CatalogError::Task(_) => FailureStage::Task,
        }
    }

    /// Empty responses are reported but are not treated as failures
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CatalogError::EmptyResponse)
    }

    /// Get detailed diagnostic information about the error
    pub fn diagnostics(&self) -> String {
        let stage = self.stage();
        match self {
            CatalogError::Network { status, message } => {
                let status = status
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| "none".to_string());
                format!(
                    "Network Error at {}\nStatus: {}\nMessage: {}\nSuggestion: {}",
                    stage.display_name(),
                    status,
                    message,
                    stage.suggestion()
                )
            }
            CatalogError::Parse { reason } => {
                format!("Parse Error\nError: {}\nSuggestion: {}", reason, stage.suggestion())
            }
            CatalogError::EmptyResponse => {
                format!("Empty Response\nSuggestion: {}", stage.suggestion())
            }
            CatalogError::Config(message) => {
                format!("Configuration Error\nMessage: {}\nSuggestion: {}", message, stage.suggestion())
            }
            CatalogError::Task(message) => {
                format!("Task Error\nMessage: {}\nSuggestion: {}", message, stage.suggestion())
            }
        }
    }
}

impl From<tokio::task::JoinError> for CatalogError {
    fn from(err: tokio::task::JoinError) -> Self {
        CatalogError::Task(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display_with_status() {
        let err = CatalogError::Network {
            status: Some(401),
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 401: Unauthorized");
        assert_eq!(err.stage(), FailureStage::HttpStatus);
    }

    #[test]
    fn test_network_display_without_status() {
        let err = CatalogError::Network {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed: connection refused");
        assert_eq!(err.stage(), FailureStage::Transport);
    }

    #[test]
    fn test_empty_response_is_not_fatal() {
        assert!(!CatalogError::EmptyResponse.is_fatal());
        assert!(CatalogError::Parse { reason: "x".into() }.is_fatal());
    }

    #[test]
    fn test_diagnostics_include_suggestion() {
        let report = CatalogError::Config("no token".into()).diagnostics();
        assert!(report.contains("no token"));
        assert!(report.contains("TMDB_ACCESS_TOKEN"));
    }

    #[tokio::test]
    async fn test_join_error_becomes_task_error() {
        let handle = tokio::spawn(async { panic!("boom") });
        let err = CatalogError::from(handle.await.unwrap_err());
        assert!(matches!(err, CatalogError::Task(_)));
        assert_eq!(err.stage(), FailureStage::Task);
        assert!(err.is_fatal());
        assert!(err.diagnostics().starts_with("Task Error"));
    }
}
