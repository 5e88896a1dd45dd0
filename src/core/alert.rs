use crate::domain::model::{AlertMessage, AuditOptions, AuditReport, DispatchOutcome};
use crate::domain::ports::Mailer;

pub const ALERT_SUBJECT: &str = "Website Monitoring Alert";

/// 有失效連結、啟用告警且收件人非空時才寄送
pub fn should_alert<'a>(options: &'a AuditOptions, report: &AuditReport) -> Option<&'a str> {
    let recipient = options.alert_recipient()?;
    if report.broken_links().is_empty() {
        return None;
    }
    Some(recipient)
}

pub fn compose_alert(report: &AuditReport, recipient: &str) -> AlertMessage {
    let broken = report.broken_links();
    let mut body = format!(
        "Broken links detected on {} ({} total):\n",
        report.target,
        broken.len()
    );
    for link in &broken {
        body.push_str("  - ");
        body.push_str(link);
        body.push('\n');
    }

    AlertMessage {
        subject: ALERT_SUBJECT.to_string(),
        body,
        recipient: recipient.to_string(),
    }
}

/// 寄送失敗只轉成 Failed，不往外拋
pub async fn dispatch<M: Mailer + ?Sized>(mailer: &M, report: &AuditReport, recipient: &str) -> DispatchOutcome {
    let message = compose_alert(report, recipient);
    match mailer.send(&message).await {
        Ok(()) => {
            tracing::info!("📧 Alert sent to {}", recipient);
            DispatchOutcome::Sent {
                recipient: recipient.to_string(),
            }
        }
        Err(e) => {
            tracing::error!("❌ Alert dispatch failed: {}", e);
            DispatchOutcome::Failed(e.to_string())
        }
    }
}
