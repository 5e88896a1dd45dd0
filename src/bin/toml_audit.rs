use clap::Parser;
use seo_sentry::app::session;
use seo_sentry::config::toml_config::{LogFormat, TomlConfig};
use seo_sentry::domain::ports::ConfigProvider;
use seo_sentry::utils::{logger, validation::Validate};

#[derive(Parser)]
#[command(name = "toml-audit")]
#[command(about = "SEO audit driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "seo-sentry.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override uptime setting from config
    #[arg(long)]
    uptime: Option<bool>,

    /// Show the configuration without auditing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = args.verbose || config.verbose();
    match config.log_format() {
        LogFormat::Text => logger::init_cli_logger(verbose),
        LogFormat::Json => logger::init_json_logger(verbose),
    }
    tracing::info!("🚀 Starting TOML-based audit");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(uptime) = args.uptime {
        config.uptime.enabled = uptime;
        tracing::info!("🔧 Uptime monitoring overridden to: {}", uptime);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no requests will be sent");
        return;
    }

    if let Err(e) = session::run_session(&config).await {
        tracing::error!("❌ Audit aborted: {}", e);
        println!("An error occurred: {}", e);
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let timings = config.audit_timings();
    let options = config.audit_options();

    println!("📋 Configuration Summary:");
    println!("  Target: {}", config.target_url());
    println!(
        "  Timeouts: page {}s, probe {}s",
        timings.page_timeout.as_secs(),
        timings.probe_timeout.as_secs()
    );
    println!("  Keyword Limit: {}", timings.keyword_limit);
    if options.enable_uptime {
        println!("  Uptime: every {}s", timings.uptime_interval.as_secs());
    } else {
        println!("  Uptime: disabled");
    }
    match options.alert_recipient() {
        Some(recipient) => println!("  Alerts: {}", recipient),
        None => println!("  Alerts: disabled"),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
}
