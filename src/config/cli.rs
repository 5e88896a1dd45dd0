use crate::config::{validate_provider, DEFAULT_SMTP_PORT};
use crate::domain::model::{AuditOptions, AuditTimings, SmtpSettings};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "seo-sentry")]
#[command(about = "Single-page SEO audit with optional uptime polling and email alerts")]
pub struct CliConfig {
    #[arg(long, help = "Page to audit (http or https)")]
    pub url: String,

    #[arg(long, help = "Keep polling the page after the audit")]
    pub uptime: bool,

    #[arg(long, help = "Email the recipient when broken links are found")]
    pub alerts: bool,

    #[arg(long)]
    pub recipient: Option<String>,

    #[arg(long)]
    pub smtp_host: Option<String>,

    #[arg(long, default_value_t = DEFAULT_SMTP_PORT)]
    pub smtp_port: u16,

    #[arg(long)]
    pub smtp_username: Option<String>,

    #[arg(long, env = "SEO_SENTRY_SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    #[arg(long, help = "From address for alert emails")]
    pub sender: Option<String>,

    #[arg(long, default_value = "10", help = "Page fetch timeout in seconds")]
    pub page_timeout: u64,

    #[arg(long, default_value = "5", help = "HEAD probe timeout in seconds")]
    pub probe_timeout: u64,

    #[arg(long, default_value = "5", help = "Seconds between uptime checks")]
    pub uptime_interval: u64,

    #[arg(long, default_value = "10")]
    pub keyword_limit: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn target_url(&self) -> &str {
        &self.url
    }

    fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            enable_uptime: self.uptime,
            enable_alerts: self.alerts,
            recipient: self.recipient.clone(),
        }
    }

    fn audit_timings(&self) -> AuditTimings {
        AuditTimings {
            page_timeout: Duration::from_secs(self.page_timeout),
            probe_timeout: Duration::from_secs(self.probe_timeout),
            uptime_interval: Duration::from_secs(self.uptime_interval),
            keyword_limit: self.keyword_limit,
        }
    }

    fn smtp_settings(&self) -> Option<SmtpSettings> {
        Some(SmtpSettings {
            host: self.smtp_host.clone()?,
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            sender: self.sender.clone()?,
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
