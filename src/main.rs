use clap::Parser;
use hosts_updater::core::ConfigProvider;
use hosts_updater::utils::logger::{self, LogFormat};
use hosts_updater::utils::validation::Validate;
use hosts_updater::{CliConfig, HickoryResolver, HostsEngine, HostsPipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::Compact, config.verbose);

    tracing::info!("Starting hosts-updater");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let dry_run = config.dry_run;
    let resolver = HickoryResolver::new(config.lookup_timeout());
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = HostsEngine::new(HostsPipeline::new(resolver, storage, config));

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let artifacts = engine.preview().await?;
        print!("{}", artifacts.combined.contents);
        return Ok(());
    }

    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ Update Hosts Success: {} resolved, {} unresolved, files: {}",
                summary.resolved,
                summary.unresolved,
                summary.artifacts.join(", ")
            );
            println!("✅ Update Hosts Success");
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

    Ok(())
}
