use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("{0}")]
    Http(String),

    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse { provider: String, message: String },

    #[error("Chart database error: {0}")]
    ChartDatabase(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("Request timed out: {}", e)
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if e.is_decode() {
            format!("Response decode error: {}", e)
        } else if let Some(status) = e.status() {
            format!("HTTP {} error: {}", status.as_u16(), e)
        } else {
            format!("HTTP error: {}", e)
        };
        Error::Http(message)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_response_message() {
        let err = Error::MalformedResponse {
            provider: "LXNS".to_string(),
            message: "player not found".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed response from LXNS: player not found");
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: Error = toml::from_str::<toml::Value>("a = ").unwrap_err().into();
        assert!(matches!(err, Error::ConfigParseError(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
