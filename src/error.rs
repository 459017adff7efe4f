use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

// Tagged at the call site, matched exhaustively at the response boundary.
// Display strings are what the caller sees; raw detail stays in the logs.
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Server configuration error. Please contact support.")]
    Unconfigured,

    #[error("News API rate limit exceeded. Please try again later.")]
    UpstreamRateLimited,

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Failed to reach the news provider")]
    Network(#[from] reqwest::Error),
}

impl NewsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::RateLimited | Self::UpstreamRateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Unconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Network(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Network(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        if let Self::Network(e) = &self {
            error!(error = %e, "upstream request failed");
        }

        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            NewsError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            NewsError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            NewsError::Unconfigured.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            NewsError::UpstreamRateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn upstream_status_is_propagated() {
        let err = NewsError::Upstream {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn bogus_upstream_status_defaults_to_500() {
        let err = NewsError::Upstream {
            status: 42,
            message: "weird".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn configuration_message_is_generic() {
        let msg = NewsError::Unconfigured.to_string();
        assert!(!msg.contains("NEWS_API_KEY"));
    }
}
