//! Human-readable rendering of an audit run, one labeled line per field.

use crate::domain::model::{
    AuditReport, DispatchOutcome, KeywordOutcome, SslStatus, UptimeSample, UptimeStatus,
};

pub const NO_TERMS_NOTICE: &str = "(no terms left after stop-word removal)";

/// 依固定順序輸出；缺少的區塊（例如抓取失敗）直接略過
pub fn render_lines(report: &AuditReport) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(error) = &report.fetch_error {
        lines.push(format!("Page Fetch Failed: {}", error));
    }
    if let Some(load_time) = report.load_time {
        lines.push(format!("Website Load Time: {:.2} seconds", load_time.as_secs_f64()));
    }

    if let Some(markup) = &report.markup {
        lines.push(format!("Title: {}", markup.title));
        lines.push(format!("Meta Description: {}", markup.meta_description));
        lines.push(format!("H1 Tag: {}", markup.h1));
    }

    if report.links.is_some() {
        let broken = report.broken_links();
        lines.push(format!("Broken Links Found: {}", broken.len()));
        lines.extend(broken.into_iter().map(str::to_string));
    }

    if let Some(ssl) = &report.ssl {
        lines.push(format!("SSL Certificate Status: {}", ssl_label(ssl)));
    }

    if let Some(markup) = &report.markup {
        let viewport = if markup.has_viewport { "detected" } else { "missing" };
        lines.push(format!("Mobile Friendly: Viewport meta tag {}", viewport));
        lines.push(format!("Images Missing Alt Text: {}", markup.images_missing_alt.len()));
        lines.extend(markup.images_missing_alt.iter().cloned());
    }

    if let Some(paths) = &report.site_files {
        lines.push(format!("Sitemap Status: {}", found(paths.sitemap_present)));
        lines.push(format!("Robots.txt Status: {}", found(paths.robots_present)));
    }

    match &report.keywords {
        Some(KeywordOutcome::Ranked(keywords)) => {
            lines.push("Top Keywords (TF-IDF):".to_string());
            if keywords.is_empty() {
                lines.push(NO_TERMS_NOTICE.to_string());
            }
            lines.extend(keywords.iter().map(|k| k.term.clone()));
        }
        Some(KeywordOutcome::NoContent) => {
            lines.push("No content found for TF-IDF analysis".to_string());
        }
        None => {}
    }

    lines
}

fn ssl_label(status: &SslStatus) -> String {
    match status {
        SslStatus::Valid => "Valid".to_string(),
        SslStatus::Invalid(reason) => format!("Invalid ({})", reason),
        SslStatus::Unverified(reason) => format!("Invalid (unverified: {})", reason),
        SslStatus::NotApplicable => "Not applicable (plain HTTP)".to_string(),
    }
}

fn found(present: bool) -> &'static str {
    if present {
        "Found"
    } else {
        "Not Found"
    }
}

pub fn render_uptime_banner(interval_seconds: u64) -> String {
    format!("Uptime Monitoring Enabled - Checking site every {} seconds", interval_seconds)
}

pub fn render_uptime(sample: &UptimeSample) -> String {
    match &sample.status {
        UptimeStatus::Up { status_code } => format!(
            "Uptime Check: {} - {}",
            status_code,
            sample.checked_at.format("%Y-%m-%d %H:%M:%S")
        ),
        UptimeStatus::Down { reason } => format!("Uptime Check Failed: {}", reason),
    }
}

pub fn render_dispatch(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Sent { recipient } => format!("Email Alert Sent to {}", recipient),
        DispatchOutcome::Failed(reason) => format!("Failed to send email: {}", reason),
    }
}
