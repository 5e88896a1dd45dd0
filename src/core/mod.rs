pub mod alert;
pub mod audit;
pub mod keywords;
pub mod links;
pub mod markup;
pub mod report;
pub mod site_files;
pub mod ssl;
pub mod uptime;

pub use crate::core::audit::{AuditEngine, AuditRun};
pub use crate::domain::ports::{ConfigProvider, Mailer};
pub use crate::utils::error::Result;
