use crate::utils::error::FetchError;
use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;

/// 標籤缺席時的預設值
pub const NOT_AVAILABLE: &str = "N/A";

/// 單次 GET 的結果，建立後不再變動
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status_code: u16,
    pub elapsed: Duration,
    pub body: String,
    pub final_url: String,
}

impl FetchResult {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSummary {
    pub title: String,
    pub meta_description: String,
    pub h1: String,
    pub has_viewport: bool,
    pub images_missing_alt: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkRecord {
    pub absolute_url: String,
    pub is_broken: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuxiliaryPaths {
    pub sitemap_present: bool,
    pub robots_present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SslStatus {
    Valid,
    Invalid(String),
    /// 探測失敗但不是憑證問題
    Unverified(String),
    /// 目標是純 http
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub term: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeywordOutcome {
    Ranked(Vec<Keyword>),
    NoContent,
}

impl KeywordOutcome {
    pub fn keywords(&self) -> &[Keyword] {
        match self {
            KeywordOutcome::Ranked(keywords) => keywords,
            KeywordOutcome::NoContent => &[],
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, KeywordOutcome::NoContent)
    }
}

/// 一次稽核的彙總；各欄位彼此獨立，某一項失敗不影響其他項
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub target: String,
    pub load_time: Option<Duration>,
    pub fetch_error: Option<FetchError>,
    pub markup: Option<MarkupSummary>,
    pub links: Option<Vec<LinkRecord>>,
    pub ssl: Option<SslStatus>,
    pub site_files: Option<AuxiliaryPaths>,
    pub keywords: Option<KeywordOutcome>,
}

impl AuditReport {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            load_time: None,
            fetch_error: None,
            markup: None,
            links: None,
            ssl: None,
            site_files: None,
            keywords: None,
        }
    }

    pub fn broken_links(&self) -> Vec<&str> {
        self.links
            .iter()
            .flatten()
            .filter(|link| link.is_broken)
            .map(|link| link.absolute_url.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { recipient: String },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UptimeStatus {
    Up { status_code: u16 },
    Down { reason: String },
}

#[derive(Debug, Clone)]
pub struct UptimeSample {
    pub checked_at: DateTime<Local>,
    pub status: UptimeStatus,
}

/// 呼叫端一次傳入的開關
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditOptions {
    pub enable_uptime: bool,
    pub enable_alerts: bool,
    pub recipient: Option<String>,
}

impl AuditOptions {
    /// 啟用告警且有收件人時才會寄信
    pub fn alert_recipient(&self) -> Option<&str> {
        if !self.enable_alerts {
            return None;
        }
        self.recipient
            .as_deref()
            .map(str::trim)
            .filter(|recipient| !recipient.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditTimings {
    pub page_timeout: Duration,
    pub probe_timeout: Duration,
    pub uptime_interval: Duration,
    pub keyword_limit: usize,
}

impl Default for AuditTimings {
    fn default() -> Self {
        Self {
            page_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            uptime_interval: Duration::from_secs(5),
            keyword_limit: 10,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sender: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("sender", &self.sender)
            .finish()
    }
}
