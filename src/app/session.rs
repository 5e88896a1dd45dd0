//! Console session shared by the binaries: audit once, print, then keep
//! printing uptime samples until Ctrl-C.

use crate::adapters::smtp::{SmtpMailer, UnconfiguredMailer};
use crate::core::audit::{AuditEngine, AuditRun};
use crate::core::report;
use crate::core::uptime::UptimeMonitor;
use crate::domain::ports::{ConfigProvider, Mailer};
use crate::utils::error::Result;
use std::future::Future;

pub fn build_mailer<C: ConfigProvider + ?Sized>(config: &C) -> Box<dyn Mailer> {
    match config.smtp_settings() {
        Some(settings) => {
            tracing::debug!("SMTP settings: {:?}", settings);
            Box::new(SmtpMailer::new(settings))
        }
        None => Box::new(UnconfiguredMailer),
    }
}

/// 報告行加上告警結果
pub fn run_lines(run: &AuditRun) -> Vec<String> {
    let mut lines = report::render_lines(&run.report);
    if let Some(outcome) = &run.alert {
        lines.push(report::render_dispatch(outcome));
    }
    lines
}

pub async fn run_session<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let engine = AuditEngine::from_config(build_mailer(config), config)?;
    let run = engine.run(config.target_url(), &config.audit_options()).await?;

    for line in run_lines(&run) {
        println!("{}", line);
    }

    if let Some(mut monitor) = run.uptime {
        println!(
            "{}",
            report::render_uptime_banner(engine.timings().uptime_interval.as_secs())
        );
        follow_uptime(&mut monitor, tokio::signal::ctrl_c(), |line| println!("{}", line)).await;
        monitor.stop().await;
    }

    Ok(())
}

/// 持續輸出樣本直到 shutdown 完成；shutdown 只建立一次，輸出期間到達的訊號也不會遺失
pub async fn follow_uptime<F, E>(monitor: &mut UptimeMonitor, shutdown: F, mut emit: E)
where
    F: Future,
    E: FnMut(String),
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            sample = monitor.next_sample() => match sample {
                Some(sample) => emit(report::render_uptime(&sample)),
                None => break,
            },
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested, leaving uptime loop");
                break;
            }
        }
    }
}
