use async_trait::async_trait;
use httpmock::prelude::*;
use httpmock::Method::HEAD;
use seo_sentry::core::report::render_lines;
use seo_sentry::domain::model::{AlertMessage, DispatchOutcome, LinkRecord, SslStatus};
use seo_sentry::domain::ports::{ConfigProvider, Mailer};
use seo_sentry::{AuditEngine, AuditOptions, AuditTimings, Result, TomlConfig};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

const HOME_PAGE: &str = r#"<html><head><title>Home</title></head><body><h1>Hi</h1><a href="/a">A</a><a href="/a">A</a><a href="mailto:x@y.com">M</a></body></html>"#;

#[derive(Clone, Default)]
struct CountingMailer {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Mailer for CountingMailer {
    async fn send(&self, _message: &AlertMessage) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn timings() -> AuditTimings {
    AuditTimings {
        page_timeout: Duration::from_secs(5),
        probe_timeout: Duration::from_secs(2),
        uptime_interval: Duration::from_millis(50),
        keyword_limit: 10,
    }
}

fn alerting() -> AuditOptions {
    AuditOptions {
        enable_uptime: false,
        enable_alerts: true,
        recipient: Some("ops@example.com".to_string()),
    }
}

#[tokio::test]
async fn test_end_to_end_markup_and_links() {
    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(HOME_PAGE);
    });
    let link_mock = server.mock(|when, then| {
        when.method(HEAD).path("/a");
        then.status(200);
    });

    let engine = AuditEngine::new(CountingMailer::default(), timings()).unwrap();
    let run = engine.run(&server.url("/"), &AuditOptions::default()).await.unwrap();
    let report = run.report;

    page_mock.assert();
    // 重複的 href 只探測一次
    link_mock.assert_hits(1);

    let markup = report.markup.as_ref().unwrap();
    assert_eq!(markup.title, "Home");
    assert_eq!(markup.h1, "Hi");
    assert_eq!(
        report.links,
        Some(vec![LinkRecord {
            absolute_url: server.url("/a"),
            is_broken: false,
        }])
    );
    assert_eq!(report.ssl, Some(SslStatus::NotApplicable));

    let lines = render_lines(&report);
    assert!(lines.contains(&"Title: Home".to_string()));
    assert!(lines.contains(&"Broken Links Found: 0".to_string()));
    assert!(lines.contains(&"No content found for TF-IDF analysis".to_string()));
    assert!(lines.iter().all(|line| !line.contains("mailto")));
}

#[tokio::test]
async fn test_sitemap_strict_200_rule() {
    for (status, expected) in [(301, false), (200, true)] {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("<p>sitemap check</p>");
        });
        server.mock(|when, then| {
            when.method(HEAD).path("/sitemap.xml");
            then.status(status).header("Location", "/elsewhere.xml");
        });

        let engine = AuditEngine::new(CountingMailer::default(), timings()).unwrap();
        let run = engine.run(&server.url("/"), &AuditOptions::default()).await.unwrap();

        let paths = run.report.site_files.unwrap();
        assert_eq!(paths.sitemap_present, expected, "status {}", status);
        assert!(!paths.robots_present);
    }
}

#[tokio::test]
async fn test_alert_sent_once_when_links_are_broken() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .body(r#"<a href="/gone">1</a><a href="/also-gone">2</a><a href="/fine">3</a>"#);
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/gone");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/also-gone");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/fine");
        then.status(204);
    });

    let mailer = CountingMailer::default();
    let engine = AuditEngine::new(mailer.clone(), timings()).unwrap();
    let run = engine.run(&server.url("/"), &alerting()).await.unwrap();

    assert_eq!(mailer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        run.alert,
        Some(DispatchOutcome::Sent {
            recipient: "ops@example.com".to_string()
        })
    );
    assert_eq!(run.report.broken_links().len(), 2);
}

#[tokio::test]
async fn test_no_alert_without_broken_links() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body(r#"<a href="/fine">ok</a>"#);
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/fine");
        then.status(200);
    });

    let mailer = CountingMailer::default();
    let engine = AuditEngine::new(mailer.clone(), timings()).unwrap();
    let run = engine.run(&server.url("/"), &alerting()).await.unwrap();

    assert_eq!(mailer.calls.load(Ordering::SeqCst), 0);
    assert!(run.alert.is_none());
}

#[tokio::test]
async fn test_no_alert_when_page_fetch_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(404);
    });

    let mailer = CountingMailer::default();
    let engine = AuditEngine::new(mailer.clone(), timings()).unwrap();
    let run = engine.run(&server.url("/"), &alerting()).await.unwrap();

    assert_eq!(mailer.calls.load(Ordering::SeqCst), 0);
    assert!(run.report.fetch_error.is_some());

    let lines = render_lines(&run.report);
    assert!(lines[0].starts_with("Page Fetch Failed:"));
    assert!(lines.contains(&"Sitemap Status: Not Found".to_string()));
}

#[tokio::test]
async fn test_toml_config_drives_the_engine() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .body("<p>alpha beta gamma alpha beta alpha</p>");
    });

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        "[target]\nurl = \"{}\"\n\n[timeouts]\npage_seconds = 5\nprobe_seconds = 2\n\n[keywords]\nlimit = 2\n",
        server.url("/")
    )
    .unwrap();

    let config = TomlConfig::from_file(config_file.path()).unwrap();
    let engine = AuditEngine::from_config(CountingMailer::default(), &config).unwrap();
    let run = engine
        .run(config.target_url(), &config.audit_options())
        .await
        .unwrap();

    let lines = render_lines(&run.report);
    let keywords_at = lines
        .iter()
        .position(|line| line == "Top Keywords (TF-IDF):")
        .unwrap();
    assert_eq!(&lines[keywords_at + 1..], &["alpha", "beta"]);
}
