use thiserror::Error;

/// 目錄請求失敗：HTTP 狀態非成功，或傳輸層錯誤
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Catalog request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Catalog request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl NetworkError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            NetworkError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, NetworkError::Transport { source, .. } if source.is_timeout())
    }

    pub fn url(&self) -> &str {
        match self {
            NetworkError::Status { url, .. } | NetworkError::Transport { url, .. } => url,
        }
    }
}

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid selector `{selector}`: {message}")]
    SelectorError { selector: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Parsing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ThemeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ThemeError::Network(_) => ErrorCategory::Network,
            ThemeError::ConfigError { .. }
            | ThemeError::InvalidConfigValueError { .. }
            | ThemeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ThemeError::SelectorError { .. } => ErrorCategory::Parsing,
            ThemeError::CsvError(_) | ThemeError::IoError(_) | ThemeError::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常可重試
            ThemeError::Network(_) => ErrorSeverity::Medium,
            ThemeError::ConfigError { .. }
            | ThemeError::InvalidConfigValueError { .. }
            | ThemeError::MissingConfigError { .. }
            | ThemeError::SelectorError { .. } => ErrorSeverity::High,
            ThemeError::CsvError(_) | ThemeError::SerializationError(_) => ErrorSeverity::High,
            ThemeError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ThemeError::Network(e) if e.is_timeout() => {
                "Increase --timeout-seconds or check your connection".to_string()
            }
            ThemeError::Network(NetworkError::Status { status, .. }) if *status >= 500 => {
                "The catalog server is having trouble, try again later".to_string()
            }
            ThemeError::Network(NetworkError::Status { .. }) => {
                "Check the catalog endpoint and the technology/price filters".to_string()
            }
            ThemeError::Network(NetworkError::Transport { .. }) => {
                "Check your network connection and the endpoint host".to_string()
            }
            ThemeError::ConfigError { .. } | ThemeError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
            ThemeError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of `{}`", field)
            }
            ThemeError::SelectorError { .. } => {
                "Correct the CSS selector in the [parser] table".to_string()
            }
            ThemeError::CsvError(_) | ThemeError::SerializationError(_) => {
                "Try a different --format".to_string()
            }
            ThemeError::IoError(_) => "Check file permissions and that the path exists".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ThemeError::Network(NetworkError::Status { status, .. }) => {
                format!("The themes catalog answered with HTTP {}", status)
            }
            ThemeError::Network(e @ NetworkError::Transport { .. }) => {
                format!("Could not reach the themes catalog at {}", e.url())
            }
            ThemeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting `{}`: {}", field, reason)
            }
            ThemeError::MissingConfigError { field } => {
                format!("Missing required setting `{}`", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_exposes_code() {
        let err = NetworkError::Status {
            url: "https://astro.build/themes/1/".to_string(),
            status: 404,
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_timeout());
        assert_eq!(err.url(), "https://astro.build/themes/1/");
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_categories_and_severity() {
        let network: ThemeError = NetworkError::Status {
            url: "http://x".to_string(),
            status: 500,
        }
        .into();
        assert_eq!(network.category(), ErrorCategory::Network);
        assert_eq!(network.severity(), ErrorSeverity::Medium);
        assert!(network.recovery_suggestion().contains("try again later"));

        let config = ThemeError::MissingConfigError {
            field: "source.endpoint".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert_eq!(
            config.user_friendly_message(),
            "Missing required setting `source.endpoint`"
        );
    }
}
