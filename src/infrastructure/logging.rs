//! Logging system configuration and initialization
//!
//! - File logging with daily rotation (non-blocking writer)
//! - Configuration file based log level control, `RUST_LOG` wins when set
//! - Structured JSON logging (optional)
//! - JST (Japan Standard Time) timestamps, matching the marketplaces' clocks

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, Utc};
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;
use crate::infrastructure::config::defaults;

const JST_OFFSET_SECONDS: i32 = 9 * 3600;

// Keeps the non-blocking file writer alive for the life of the process
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> =
        Mutex::new(Vec::new());
}

/// Custom time formatter for JST (UTC+9)
struct JstTimeFormatter;

impl FormatTime for JstTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let offset = FixedOffset::east_opt(JST_OFFSET_SECONDS).ok_or(std::fmt::Error)?;
        let jst_time = Utc::now().with_timezone(&offset);
        write!(w, "{}", jst_time.format("%Y-%m-%d %H:%M:%S%.3f %:z"))
    }
}

/// Log directory: the configured one, else `logs/` next to the executable
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.directory {
        return dir.clone();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Build the level filter for `config`
///
/// `RUST_LOG` takes precedence. Otherwise the configured level applies to
/// our crate and the module filters cap noisy dependencies, unless the level
/// is `trace`, in which case everything is shown.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    if !config.level.to_lowercase().contains("trace") {
        let mut modules: Vec<_> = config.module_filters.iter().collect();
        modules.sort();
        for (module, level) in modules {
            let directive = format!("{}={}", module, level)
                .parse()
                .with_context(|| format!("Invalid module filter: {}={}", module, level))?;
            filter = filter.add_directive(directive);
        }
    }

    let own = format!("doozie_search_lib={}", config.level)
        .parse()
        .context("Invalid application log directive")?;
    Ok(filter.add_directive(own))
}

/// Initialize logging with custom configuration
///
/// Console output goes to stderr so it never mixes with rendered results.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.file_output && !config.console_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = build_env_filter(config)?;
    let log_dir = get_log_directory(config);
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.file_output {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

        let file_appender = rolling::daily(&log_dir, defaults::LOG_FILE_NAME);
        let (file_writer, file_guard) = non_blocking(file_appender);
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(file_guard);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_timer(JstTimeFormatter)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(file_writer)
                .with_timer(JstTimeFormatter)
                .with_target(true)
                .with_ansi(false)
                .boxed()
        };
        layers.push(file_layer);
    }

    if config.console_output {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(JstTimeFormatter)
                .with_target(false)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    info!("Logging system initialized");
    info!("Log directory: {:?}", log_dir);
    info!("Log level: {}", config.level);
    info!("JSON format: {}", config.json_format);
    info!("Console output: {}", config.console_output);
    info!("File output: {}", config.file_output);

    Ok(())
}

/// Log system information for diagnostics
pub fn log_system_info(config: &LoggingConfig) {
    info!("=== Doozie Search System Information ===");
    info!("Application version: {}", env!("CARGO_PKG_VERSION"));
    info!("Operating system: {}", std::env::consts::OS);
    info!("Architecture: {}", std::env::consts::ARCH);

    if let Ok(current_dir) = std::env::current_dir() {
        info!("Working directory: {:?}", current_dir);
    }

    info!("Log directory: {:?}", get_log_directory(config));
    info!("========================================");
}
