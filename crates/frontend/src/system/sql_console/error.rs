use thiserror::Error;

/// Failure of a call to the data source REST service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("{status} {status_text} {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },
    /// Request never produced an HTTP response
    #[error("network error: {0}")]
    Transport(String),
    /// 2xx response whose body did not match the expected shape
    #[error("{status} {status_text} invalid response: {detail}")]
    Decode {
        status: u16,
        status_text: String,
        detail: String,
    },
}

/// The only failure a query submission reports to the user
#[derive(Debug, Clone, PartialEq, Error)]
#[error("query failed: {status} {status_text} {body}")]
pub struct QueryExecutionFailure {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl From<ApiError> for QueryExecutionFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http {
                status,
                status_text,
                body,
            } => Self {
                status,
                status_text,
                body,
            },
            // Browsers report status 0 when no response was received
            ApiError::Transport(detail) => Self {
                status: 0,
                status_text: "network error".to_string(),
                body: detail,
            },
            ApiError::Decode {
                status,
                status_text,
                detail,
            } => Self {
                status,
                status_text,
                body: format!("invalid response: {}", detail),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_failure_message() {
        let failure = QueryExecutionFailure::from(ApiError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "syntax error".to_string(),
        });
        assert_eq!(
            failure.to_string(),
            "query failed: 500 Internal Server Error syntax error"
        );
    }

    #[test]
    fn test_transport_failure_uses_status_zero() {
        let failure = QueryExecutionFailure::from(ApiError::Transport(
            "TypeError: Failed to fetch".to_string(),
        ));
        assert_eq!(failure.status, 0);
        assert_eq!(
            failure.to_string(),
            "query failed: 0 network error TypeError: Failed to fetch"
        );
    }

    #[test]
    fn test_decode_failure_keeps_status() {
        let failure = QueryExecutionFailure::from(ApiError::Decode {
            status: 200,
            status_text: "OK".to_string(),
            detail: "missing field `rowCount`".to_string(),
        });
        assert_eq!(failure.status, 200);
        assert_eq!(
            failure.to_string(),
            "query failed: 200 OK invalid response: missing field `rowCount`"
        );
    }
}
