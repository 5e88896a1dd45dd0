#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_range};

pub const MAX_TIMEOUT_SECONDS: u64 = 300;
pub const MAX_KEYWORD_LIMIT: usize = 100;
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// CLI 與 TOML 共用的檢查規則
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_non_empty_string("target.url", config.target_url())?;

    let timings = config.audit_timings();
    validate_range(
        "timeouts.page_seconds",
        timings.page_timeout.as_secs(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    validate_range(
        "timeouts.probe_seconds",
        timings.probe_timeout.as_secs(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    if timings.uptime_interval.as_secs() < 1 {
        return Err(AuditError::InvalidConfigValueError {
            field: "uptime.interval_seconds".to_string(),
            value: timings.uptime_interval.as_secs().to_string(),
            reason: "Interval must be at least 1 second".to_string(),
        });
    }
    validate_range("keywords.limit", timings.keyword_limit, 1, MAX_KEYWORD_LIMIT)?;

    let options = config.audit_options();
    if let Some(recipient) = options.alert_recipient() {
        validate_email("alerts.recipient", recipient)?;

        let smtp = config.smtp_settings().ok_or_else(|| AuditError::MissingConfigError {
            field: "smtp.host".to_string(),
        })?;
        validate_non_empty_string("smtp.host", &smtp.host)?;
        validate_email("smtp.sender", &smtp.sender)?;
    }

    Ok(())
}
