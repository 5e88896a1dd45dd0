use thiserror::Error;

/// 主頁面抓取失敗的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("TLS handshake with {url} failed: {message}")]
    Tls { url: String, message: String },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// HEAD 探測失敗的原因（連結或輔助路徑）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("probe of {url} timed out")]
    Timeout { url: String },

    #[error("probe of {url} failed: {message}")]
    Transport { url: String, message: String },
}

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("SSL validation failed: {message}")]
    SslValidation { message: String },

    #[error("No paragraph content to analyze")]
    EmptyCorpus,

    #[error("Alert dispatch failed: {message}")]
    Dispatch { message: String },

    #[error("Invalid target URL '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl AuditError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AuditError::ConfigValidationError { .. }
                | AuditError::InvalidConfigValueError { .. }
                | AuditError::MissingConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::InvalidTarget { url, .. } => {
                format!("'{}' is not a URL that can be audited", url)
            }
            AuditError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            AuditError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            AuditError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            AuditError::Dispatch { message } => format!("Could not send alert: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuditError::InvalidTarget { .. } => {
                "Pass a full URL including the scheme, e.g. https://example.com/"
            }
            AuditError::MissingConfigError { .. } => {
                "Provide the missing setting via command-line flag or config file"
            }
            AuditError::InvalidConfigValueError { .. } | AuditError::ConfigValidationError { .. } => {
                "Check the value against the documented range and format"
            }
            AuditError::Dispatch { .. } => "Verify SMTP host, port, credentials and sender address",
            AuditError::Fetch(_) | AuditError::Probe(_) | AuditError::Http(_) => {
                "Check network connectivity and that the site is reachable"
            }
            AuditError::SslValidation { .. } => "Inspect the site's certificate chain and expiry",
            AuditError::EmptyCorpus => "The page has no paragraph text; nothing to rank",
            AuditError::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_flagged() {
        let err = AuditError::MissingConfigError {
            field: "smtp.host".to_string(),
        };
        assert!(err.is_config_error());
        assert!(err.user_friendly_message().contains("smtp.host"));

        let err = AuditError::EmptyCorpus;
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_fetch_error_display_carries_status() {
        let err: AuditError = FetchError::Status {
            url: "https://example.com/".to_string(),
            status: 503,
        }
        .into();
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_stage_failures_convert_to_audit_errors() {
        let err: AuditError = ProbeError::Timeout {
            url: "https://example.com/sitemap.xml".to_string(),
        }
        .into();
        assert!(matches!(err, AuditError::Probe(_)));
        assert!(err.to_string().contains("sitemap.xml"));

        let err = AuditError::SslValidation {
            message: "invalid peer certificate: Expired".to_string(),
        };
        assert!(err.to_string().starts_with("SSL validation failed"));
        assert!(err.recovery_suggestion().contains("certificate"));
    }
}
