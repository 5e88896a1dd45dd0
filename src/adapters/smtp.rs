use crate::domain::model::{AlertMessage, SmtpSettings};
use crate::domain::ports::Mailer;
use crate::utils::error::{AuditError, Result};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// 透過 STARTTLS 投遞純文字告警
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn build_message(&self, alert: &AlertMessage) -> Result<Message> {
        let from: Mailbox = self.settings.sender.parse().map_err(|e| AuditError::Dispatch {
            message: format!("invalid sender '{}': {}", self.settings.sender, e),
        })?;
        let to: Mailbox = alert.recipient.parse().map_err(|e| AuditError::Dispatch {
            message: format!("invalid recipient '{}': {}", alert.recipient, e),
        })?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(alert.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body.clone())
            .map_err(|e| AuditError::Dispatch {
                message: format!("could not build message: {}", e),
            })
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
            .map_err(|e| AuditError::Dispatch {
                message: format!("cannot reach {}: {}", self.settings.host, e),
            })?
            .port(self.settings.port)
            .timeout(Some(SMTP_TIMEOUT));

        if let (Some(username), Some(password)) = (&self.settings.username, &self.settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, alert: &AlertMessage) -> Result<()> {
        let message = self.build_message(alert)?;
        let transport = self.build_transport()?;

        tracing::debug!(
            "Sending alert via {}:{} to {}",
            self.settings.host,
            self.settings.port,
            alert.recipient
        );

        transport
            .send(message)
            .await
            .map_err(|e| AuditError::Dispatch {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// 未設定 SMTP 時使用；每次寄送都回報失敗
pub struct UnconfiguredMailer;

#[async_trait]
impl Mailer for UnconfiguredMailer {
    async fn send(&self, _alert: &AlertMessage) -> Result<()> {
        Err(AuditError::Dispatch {
            message: "SMTP transport is not configured".to_string(),
        })
    }
}
