use crate::adapters::http::{PageFetcher, Prober};
use crate::core::uptime::UptimeMonitor;
use crate::core::{alert, keywords, links, markup, site_files, ssl};
use crate::domain::model::{AuditOptions, AuditReport, AuditTimings, DispatchOutcome, MarkupSummary};
use crate::domain::ports::{ConfigProvider, Mailer};
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::parse_target_url;
use scraper::Html;

/// 一次稽核的結果；uptime 若啟用，背景任務的把手交給呼叫端
pub struct AuditRun {
    pub report: AuditReport,
    pub alert: Option<DispatchOutcome>,
    pub uptime: Option<UptimeMonitor>,
}

/// 解析後立即丟棄 Html（非 Send），只保留後續階段需要的資料
struct ParsedPage {
    markup: MarkupSummary,
    links: Vec<String>,
    paragraph_text: String,
}

impl ParsedPage {
    fn parse(body: &str, base: &url::Url) -> Self {
        let document = Html::parse_document(body);
        Self {
            markup: markup::analyze(&document),
            links: links::collect_links(&document, base),
            paragraph_text: keywords::paragraph_text(&document),
        }
    }
}

pub struct AuditEngine<M: Mailer> {
    fetcher: PageFetcher,
    prober: Prober,
    mailer: M,
    timings: AuditTimings,
}

impl<M: Mailer> AuditEngine<M> {
    pub fn new(mailer: M, timings: AuditTimings) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new()?,
            prober: Prober::new()?,
            mailer,
            timings,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(mailer: M, config: &C) -> Result<Self> {
        Self::new(mailer, config.audit_timings())
    }

    pub fn timings(&self) -> &AuditTimings {
        &self.timings
    }

    /// 各階段失敗只影響自己的欄位；只有目標網址無效才回傳錯誤
    pub async fn run(&self, target: &str, options: &AuditOptions) -> Result<AuditRun> {
        let base = parse_target_url(target)?;
        let mut report = AuditReport::new(base.as_str());

        tracing::info!("🔍 Auditing {}", base);

        // Fetch
        let page = match self.fetcher.fetch(base.as_str(), self.timings.page_timeout).await {
            Ok(result) => {
                tracing::info!(
                    "✅ Fetched {} ({}) in {:.2}s",
                    result.final_url,
                    result.status_code,
                    result.elapsed_seconds()
                );
                report.load_time = Some(result.elapsed);
                Some(ParsedPage::parse(&result.body, &base))
            }
            Err(e) => {
                tracing::error!("❌ Page fetch failed: {}", e);
                report.fetch_error = Some(e);
                None
            }
        };

        // Markup + links
        let mut paragraph_text = None;
        if let Some(page) = page {
            tracing::debug!("Found {} unique links", page.links.len());
            report.markup = Some(page.markup);
            report.links =
                Some(links::probe_links(&self.prober, page.links, self.timings.probe_timeout).await);
            paragraph_text = Some(page.paragraph_text);
        }

        // SSL
        report.ssl = Some(ssl::check_ssl(&self.fetcher, &base, self.timings.page_timeout).await);

        // Sitemap / robots
        report.site_files = Some(
            site_files::check_auxiliary_paths(&self.prober, &base, self.timings.probe_timeout).await,
        );

        // Keywords
        report.keywords = paragraph_text
            .map(|text| keywords::extract_keywords(&text, self.timings.keyword_limit));
        if report.keywords.as_ref().is_some_and(|k| k.is_no_content()) {
            tracing::info!("{}", AuditError::EmptyCorpus);
        }

        // Uptime
        let uptime = options.enable_uptime.then(|| {
            UptimeMonitor::spawn(
                self.fetcher.clone(),
                base.to_string(),
                self.timings.uptime_interval,
                self.timings.probe_timeout,
            )
        });

        // Alert
        let alert = match alert::should_alert(options, &report) {
            Some(recipient) => Some(alert::dispatch(&self.mailer, &report, recipient).await),
            None => None,
        };

        tracing::info!(
            "🏁 Audit finished: {} broken link(s)",
            report.broken_links().len()
        );

        Ok(AuditRun {
            report,
            alert,
            uptime,
        })
    }
}
