use clap::Parser;
use seo_sentry::app::session;
use seo_sentry::utils::{logger, validation::Validate};
use seo_sentry::CliConfig;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting seo-sentry CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 稽核期間的錯誤只輸出一行，不以錯誤碼結束
    if let Err(e) = session::run_session(&config).await {
        tracing::error!("❌ Audit aborted: {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        println!("An error occurred: {}", e);
    }
}
