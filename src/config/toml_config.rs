use crate::config::{validate_provider, DEFAULT_SMTP_PORT};
use crate::core::keywords::DEFAULT_KEYWORD_LIMIT;
use crate::domain::model::{AuditOptions, AuditTimings, SmtpSettings};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub target: TargetConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub uptime: UptimeConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    pub smtp: Option<SmtpConfig>,
    #[serde(default)]
    pub keywords: KeywordConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub page_seconds: Option<u64>,
    pub probe_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UptimeConfig {
    #[serde(default)]
    pub enabled: bool,
    pub interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default)]
    pub enabled: bool,
    pub recipient: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sender: String,
}

// 密碼不進日誌
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("sender", &self.sender)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub verbose: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SMTP_PASSWORD})；未設定的保留原字串
    fn substitute_env_vars(content: &str) -> String {
        static ENV_REF: OnceLock<Regex> = OnceLock::new();
        let re = ENV_REF.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose
    }
}

impl ConfigProvider for TomlConfig {
    fn target_url(&self) -> &str {
        &self.target.url
    }

    fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            enable_uptime: self.uptime.enabled,
            enable_alerts: self.alerts.enabled,
            recipient: self.alerts.recipient.clone(),
        }
    }

    fn audit_timings(&self) -> AuditTimings {
        let defaults = AuditTimings::default();
        AuditTimings {
            page_timeout: self
                .timeouts
                .page_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.page_timeout),
            probe_timeout: self
                .timeouts
                .probe_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.probe_timeout),
            uptime_interval: self
                .uptime
                .interval_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.uptime_interval),
            keyword_limit: self.keywords.limit.unwrap_or(DEFAULT_KEYWORD_LIMIT),
        }
    }

    fn smtp_settings(&self) -> Option<SmtpSettings> {
        self.smtp.as_ref().map(|smtp| SmtpSettings {
            host: smtp.host.clone(),
            port: smtp.port.unwrap_or(DEFAULT_SMTP_PORT),
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            sender: smtp.sender.clone(),
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[target]
url = "https://example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.target_url(), "https://example.com");
        assert_eq!(config.audit_timings(), AuditTimings::default());
        assert_eq!(config.audit_options(), AuditOptions::default());
        assert!(config.smtp_settings().is_none());
        assert_eq!(config.log_format(), LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[target]
url = "https://example.com/blog"

[timeouts]
page_seconds = 20
probe_seconds = 3

[uptime]
enabled = true
interval_seconds = 30

[alerts]
enabled = true
recipient = "ops@example.com"

[smtp]
host = "smtp.example.com"
username = "bot"
password = "hunter2"
sender = "bot@example.com"

[keywords]
limit = 15

[logging]
format = "json"
verbose = true
"#,
        )
        .unwrap();

        let timings = config.audit_timings();
        assert_eq!(timings.page_timeout, Duration::from_secs(20));
        assert_eq!(timings.probe_timeout, Duration::from_secs(3));
        assert_eq!(timings.uptime_interval, Duration::from_secs(30));
        assert_eq!(timings.keyword_limit, 15);

        let options = config.audit_options();
        assert!(options.enable_uptime);
        assert_eq!(options.alert_recipient(), Some("ops@example.com"));

        let smtp = config.smtp_settings().unwrap();
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.password.as_deref(), Some("hunter2"));
        assert!(!format!("{:?}", config.smtp).contains("hunter2"));

        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SEO_SENTRY_TEST_SMTP_PASSWORD", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[target]
url = "https://example.com"

[smtp]
host = "smtp.example.com"
password = "${SEO_SENTRY_TEST_SMTP_PASSWORD}"
sender = "bot@example.com"
"#,
        )
        .unwrap();
        assert_eq!(
            config.smtp_settings().unwrap().password.as_deref(),
            Some("from-env")
        );

        std::env::remove_var("SEO_SENTRY_TEST_SMTP_PASSWORD");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let config = TomlConfig::from_toml_str(
            r#"
[target]
url = "${SEO_SENTRY_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(config.target_url(), "${SEO_SENTRY_TEST_UNSET_VARIABLE}");
    }

    #[test]
    fn test_validation_failures() {
        let empty_target = TomlConfig::from_toml_str("[target]\nurl = \"  \"\n").unwrap();
        assert!(empty_target.validate().is_err());

        let slow = TomlConfig::from_toml_str(
            "[target]\nurl = \"https://example.com\"\n[timeouts]\nprobe_seconds = 301\n",
        )
        .unwrap();
        assert!(slow.validate().is_err());

        let alerts_without_smtp = TomlConfig::from_toml_str(
            "[target]\nurl = \"https://example.com\"\n[alerts]\nenabled = true\nrecipient = \"ops@example.com\"\n",
        )
        .unwrap();
        let err = alerts_without_smtp.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_missing_target_section_is_parse_error() {
        let err = TomlConfig::from_toml_str("[uptime]\nenabled = true\n").unwrap_err();
        assert!(matches!(err, AuditError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[target]\nurl = \"https://file.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.target_url(), "https://file.example.com");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/seo-sentry.toml").unwrap_err();
        assert!(matches!(err, AuditError::IoError(_)));
    }
}
