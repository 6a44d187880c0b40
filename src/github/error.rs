//! Typed failures for GitHub API calls
//!
//! The taxonomy matters for degradation policy: Auth at the validation step
//! kills the whole analysis, while Forbidden/NotFound during enumeration are
//! routine for tokens lacking a specific grant and degrade to "no data".

use thiserror::Error;

/// Errors produced by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 - the token is invalid, expired, or lacks permission entirely
    #[error("Invalid token or insufficient permissions")]
    Auth,

    /// 403 - rate limited or access to this resource is forbidden
    #[error("Rate limit exceeded or access forbidden")]
    Forbidden,

    /// 404 - the resource does not exist (or is hidden from this token)
    #[error("Resource not found")]
    NotFound,

    /// Any other non-2xx status
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// DNS/connect/transport failure before a status was received
    #[error("Network error - {0}")]
    Transport(String),

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map an HTTP status to the right variant. 2xx never reaches this.
    pub fn from_status(status: u16, reason: &str) -> Self {
        match status {
            401 => ApiError::Auth,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            _ => ApiError::Http {
                status,
                reason: reason.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ApiError::from_status(401, ""), ApiError::Auth));
        assert!(matches!(ApiError::from_status(403, ""), ApiError::Forbidden));
        assert!(matches!(ApiError::from_status(404, ""), ApiError::NotFound));

        match ApiError::from_status(500, "Internal Server Error") {
            ApiError::Http { status, reason } => {
                assert_eq!(status, 500);
                assert_eq!(reason, "Internal Server Error");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ApiError::Auth.to_string(),
            "Invalid token or insufficient permissions"
        );
        assert_eq!(
            ApiError::from_status(502, "Bad Gateway").to_string(),
            "HTTP 502: Bad Gateway"
        );
    }
}
