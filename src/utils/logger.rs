use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log targets emitted by this crate and its binaries.
const TARGETS: &[&str] = &["hosts_updater", "toml_hosts"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    /// One JSON object per line, for CI log collection.
    Json,
}

/// Default filter when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives: Vec<String> = TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect();
    // 其他 crate 只看 warn 以上
    directives.push("warn".to_string());
    directives.join(",")
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
    }
}
