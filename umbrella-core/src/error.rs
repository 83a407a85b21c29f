use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UmbrellaError>;

/// Everything that can end a forecast run.
#[derive(Debug, Error)]
pub enum UmbrellaError {
    /// The caller passed something unusable (empty city, non-positive timeout, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Connection, TLS or timeout failure before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a failure status.
    #[error("API error {status} ({kind}): {detail}")]
    Api {
        status: u16,
        kind: ApiErrorKind,
        detail: String,
    },

    /// The body was not the JSON we expected.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UmbrellaError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        UmbrellaError::InvalidArgument(msg.into())
    }

    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        UmbrellaError::Api {
            status,
            kind: ApiErrorKind::from_status(status),
            detail: detail.into(),
        }
    }

    /// Short advice for the user, if this failure has an obvious fix.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            UmbrellaError::Api { kind, .. } => kind.hint(),
            UmbrellaError::Transport(_) => {
                Some("Check your network connection or raise the request timeout.")
            }
            _ => None,
        }
    }
}

/// Failure statuses the forecast API is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Unauthorized,
    NotFound,
    RateLimited,
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            429 => ApiErrorKind::RateLimited,
            _ => ApiErrorKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::RateLimited => "rate limited",
            ApiErrorKind::Other => "unexpected status",
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            ApiErrorKind::Unauthorized => Some(
                "Check your API key: https://home.openweathermap.org/api_keys",
            ),
            ApiErrorKind::NotFound => Some("Check the spelling of the city name."),
            ApiErrorKind::RateLimited => Some("Too many requests; wait a bit and try again."),
            ApiErrorKind::Other => None,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_is_tagged_by_status() {
        let err = UmbrellaError::api(401, "Invalid API key");
        match err {
            UmbrellaError::Api { status, kind, ref detail } => {
                assert_eq!(status, 401);
                assert_eq!(kind, ApiErrorKind::Unauthorized);
                assert_eq!(detail, "Invalid API key");
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("unauthorized"));
    }

    #[test]
    fn hints_only_for_known_failures() {
        assert!(UmbrellaError::api(404, "city not found").hint().is_some());
        assert!(UmbrellaError::api(429, "slow down").hint().is_some());
        assert!(UmbrellaError::api(500, "boom").hint().is_none());
        assert!(UmbrellaError::Decode("bad".into()).hint().is_none());
    }

    #[test]
    fn hints_do_not_name_command_line_flags() {
        let errors = [
            UmbrellaError::Transport("request timed out".into()),
            UmbrellaError::api(401, "Invalid API key"),
            UmbrellaError::api(404, "city not found"),
            UmbrellaError::api(429, "slow down"),
        ];
        for err in errors {
            let hint = err.hint().unwrap();
            assert!(!hint.contains("--"), "{hint}");
        }
    }
}
