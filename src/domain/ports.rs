use crate::domain::model::{AlertMessage, AuditOptions, AuditTimings, SmtpSettings};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn target_url(&self) -> &str;
    fn audit_options(&self) -> AuditOptions;
    fn audit_timings(&self) -> AuditTimings;
    fn smtp_settings(&self) -> Option<SmtpSettings>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &AlertMessage) -> Result<()>;
}

#[async_trait]
impl<M: Mailer + ?Sized> Mailer for Box<M> {
    async fn send(&self, message: &AlertMessage) -> Result<()> {
        (**self).send(message).await
    }
}
