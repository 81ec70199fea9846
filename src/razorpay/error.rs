//! Razorpay client error types.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by [`RazorpayClient`](super::RazorpayClient).
#[derive(Debug, Error)]
pub enum RazorpayError {
    /// The API rejected the request with a structured error body.
    ///
    /// Displays only the description, which is what Razorpay intends to be
    /// shown to the caller.
    #[error("{description}")]
    Api {
        status: StatusCode,
        code: String,
        description: String,
    },

    /// A non-success status without a recognisable error body.
    #[error("unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        context: String,
        status: StatusCode,
        body: String,
    },

    /// Transport failure, including timeouts.
    #[error("HTTP error: {context}: {source}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// A success response whose body was not valid JSON.
    #[error("failed to decode response: {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to encode query string: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// An id that would not name a single path segment.
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(&'static str),
}

impl RazorpayError {
    /// Build the error for a non-success response body.
    pub(crate) fn from_response(context: String, status: StatusCode, body: String) -> Self {
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) if !parsed.error.description.is_empty() => Self::Api {
                status,
                code: parsed.error.code,
                description: parsed.error.description,
            },
            _ => Self::HttpStatus {
                context,
                status,
                body,
            },
        }
    }

    /// HTTP status of the failed call, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            Self::Http { source, .. } | Self::Decode { source, .. } => source.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_description() {
        let body = r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"The id provided does not exist"}}"#;
        let err = RazorpayError::from_response("GET /v1/refunds".into(), StatusCode::BAD_REQUEST, body.into());
        assert_eq!(err.to_string(), "The id provided does not exist");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        match err {
            RazorpayError::Api { code, .. } => assert_eq!(code, "BAD_REQUEST_ERROR"),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_unstructured_body_keeps_status() {
        let err = RazorpayError::from_response(
            "GET /v1/orders".into(),
            StatusCode::BAD_GATEWAY,
            "upstream down".into(),
        );
        assert_eq!(
            err.to_string(),
            "unexpected HTTP status 502 Bad Gateway: GET /v1/orders: upstream down"
        );
    }

    #[test]
    fn test_empty_description_is_not_api_error() {
        let err = RazorpayError::from_response(
            "GET /v1/orders".into(),
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":"X"}}"#.into(),
        );
        assert!(matches!(err, RazorpayError::HttpStatus { .. }));
    }
}
