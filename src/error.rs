use std::io;
use std::result::Result as StdResult;
use thiserror::Error;
use warp::http::StatusCode;

pub const MSG_MISSING_MINT: &str = "Token mint is required";
pub const MSG_PAIR_NOT_FOUND: &str = "No SOL pair found for token on compatible DEXes";
pub const MSG_PRICE_UNAVAILABLE: &str = "Could not get token price data";
pub const MSG_GENERATION_FAILED: &str = "Failed to generate candle data";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),
    #[error("Pair not found: {0}")]
    PairNotFound(String),
    #[error("Price unavailable: {0}")]
    PriceUnavailable(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl Error {
    /// HTTP status the web layer answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Error::PairNotFound(_) | Error::PriceUnavailable(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed client-facing message. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::MissingParameter(_) => MSG_MISSING_MINT,
            Error::PairNotFound(_) => MSG_PAIR_NOT_FOUND,
            Error::PriceUnavailable(_) => MSG_PRICE_UNAVAILABLE,
            _ => MSG_GENERATION_FAILED,
        }
    }

    /// Data availability and client errors are expected in normal operation.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter(_) | Error::PairNotFound(_) | Error::PriceUnavailable(_)
        )
    }
}

pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::MissingParameter("tokenMint".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::PairNotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::PriceUnavailable("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::InvalidInput("count".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::UpstreamFailure("timeout".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_messages_hide_detail() {
        let err = Error::UpstreamFailure("connection refused at 10.0.0.3".into());
        assert_eq!(err.public_message(), MSG_GENERATION_FAILED);
        assert_eq!(Error::PairNotFound("abc".into()).public_message(), MSG_PAIR_NOT_FOUND);
        assert_eq!(
            Error::PriceUnavailable("abc".into()).public_message(),
            MSG_PRICE_UNAVAILABLE
        );
        assert_eq!(Error::MissingParameter("tokenMint".into()).public_message(), MSG_MISSING_MINT);
    }

    #[test]
    fn test_json_errors_become_parse_errors() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::ParseError(_)));
        assert!(!err.is_expected());
    }
}
