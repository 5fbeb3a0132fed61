//! Catalogue client error types.

use std::fmt;

/// Errors from the site-catalogue HTTP client.
#[derive(Debug)]
pub enum CatalogError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid credentials or unauthorized
    Unauthorized,

    /// Mock or fixture data could not be loaded
    Fixture(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Http(e) => write!(f, "HTTP error: {e}"),
            CatalogError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            CatalogError::Api { status, message } => {
                write!(f, "catalogue API error {status}: {message}")
            }
            CatalogError::RateLimited => write!(f, "rate limited by the catalogue API"),
            CatalogError::Unauthorized => write!(f, "unauthorized (invalid catalogue credentials)"),
            CatalogError::Fixture(msg) => write!(f, "fixture data error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::Unauthorized;
        assert_eq!(
            err.to_string(),
            "unauthorized (invalid catalogue credentials)"
        );

        let err = CatalogError::Api {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "catalogue API error 503: maintenance");

        let err = CatalogError::Json {
            message: "expected array".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected array"));
    }
}
