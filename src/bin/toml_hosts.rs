use clap::Parser;
use hosts_updater::core::ConfigProvider;
use hosts_updater::utils::logger::{self, LogFormat};
use hosts_updater::utils::validation::Validate;
use hosts_updater::{HickoryResolver, HostsEngine, HostsPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-hosts")]
#[command(about = "Hosts updater driven by a TOML settings file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "hosts.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the concurrency setting from config
    #[arg(long)]
    concurrency: Option<usize>,

    /// Dry run - resolve and print without writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 設定檔不存在或無效時直接結束
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let format = if config.json_logging() {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, args.verbose);

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(concurrency) = args.concurrency {
        config.resolver.concurrency = Some(concurrency);
        tracing::info!("🔧 Concurrency overridden to: {}", concurrency);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!(
        "Domain file: {}, output: {}, concurrency: {}, timeout: {:?}",
        config.domain_file(),
        config.output_path(),
        config.concurrency(),
        config.lookup_timeout()
    );

    let resolver = HickoryResolver::new(config.lookup_timeout());
    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = HostsEngine::new(HostsPipeline::new(resolver, storage, config));

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let artifacts = engine.preview().await?;
        for artifact in artifacts.iter() {
            println!("==> {} <==\n{}\n", artifact.name, artifact.contents);
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ Update Hosts Success: {} groups, {} resolved, {} unresolved",
                summary.groups,
                summary.resolved,
                summary.unresolved
            );
            println!("✅ Update Hosts Success");
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Hosts update failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}
