use thiserror::Error;

/// Failures of a single search attempt. Each one is scoped to that attempt:
/// the credential, filters and page survive so the user can correct and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please configure your API key in settings first")]
    MissingCredential,

    #[error("Invalid API key. Please check your settings.")]
    InvalidCredential,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API error: {0}")]
    RemoteError(u16),

    #[error("Failed to fetch jobs. Please check your internet connection.")]
    NetworkError(String),

    #[error("No jobs found. Try adjusting your search criteria.")]
    NoResults,

    #[error("An error occurred. Please try again.")]
    MalformedResponse(String),
}

impl SearchError {
    /// `NoResults` is a valid empty outcome, shown as guidance rather than alarm.
    pub fn is_guidance(&self) -> bool {
        matches!(self, SearchError::NoResults)
    }

    /// Underlying cause for logs, when there is one beyond the user message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            SearchError::NetworkError(detail) | SearchError::MalformedResponse(detail) => {
                Some(detail)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SearchError::RateLimited.to_string(),
            "Rate limit exceeded. Please try again later."
        );
        assert_eq!(SearchError::RemoteError(503).to_string(), "API error: 503");
        assert_eq!(
            SearchError::NetworkError("dns failure".to_string()).to_string(),
            "Failed to fetch jobs. Please check your internet connection."
        );
    }

    #[test]
    fn test_only_no_results_is_guidance() {
        assert!(SearchError::NoResults.is_guidance());
        assert!(!SearchError::RateLimited.is_guidance());
        assert!(!SearchError::MissingCredential.is_guidance());
    }

    #[test]
    fn test_detail_hidden_from_message() {
        let err = SearchError::MalformedResponse("expected value at line 1".to_string());
        assert_eq!(err.detail(), Some("expected value at line 1"));
        assert!(!err.to_string().contains("line 1"));
    }
}
