pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::core::{AuditEngine, AuditRun};
pub use crate::domain::model::{AuditOptions, AuditReport, AuditTimings};
pub use crate::utils::error::{AuditError, Result};
