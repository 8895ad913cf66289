use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Decode,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchErrorKind::Transport => f.write_str("transport"),
            FetchErrorKind::Decode => f.write_str("decode"),
        }
    }
}

/// Failure of a single call to one of the upstream endpoints.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn decode(endpoint: &'static str, source: serde_json::Error) -> Self {
        FetchError::Decode { endpoint, source }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { .. } | FetchError::Status { .. } => FetchErrorKind::Transport,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
        }
    }
}
