//! Doozie Search - marketplace product search client
//!
//! Searches Rakuten and Yahoo Japan through the Doozie backend, normalizes
//! both item shapes into one product record and lets the user filter, sort
//! and page through the results from an interactive terminal session.

// Module declarations
pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
mod test_utils;

use anyhow::{Context, Result, bail};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::application::{SearchSession, SearchUseCases};
use crate::commands::{CommandOutcome, execute_line, render_screen};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::{init_logging_with_config, log_system_info};
use crate::infrastructure::{ApiService, AppConfig, HttpSearchBackend};

const PROMPT: &str = "doozie> ";

/// Parsed process arguments
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub init_config: bool,
    /// A single shell command to run instead of the interactive session
    pub command: Option<String>,
}

impl Invocation {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut invocation = Self::default();
        let mut words = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().context("--config requires a file path")?;
                    invocation.config_path = Some(PathBuf::from(path));
                }
                "init-config" if words.is_empty() => invocation.init_config = true,
                flag if flag.starts_with("--") && words.is_empty() => {
                    bail!("Unknown option: {flag}");
                }
                _ => words.push(arg),
            }
        }

        if !words.is_empty() {
            invocation.command = Some(words.join(" "));
        }
        Ok(invocation)
    }
}

/// Entry point for the `doozie-search` binary
pub fn run() -> Result<()> {
    let invocation = Invocation::parse(std::env::args().skip(1))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run_invocation(invocation))
}

pub async fn run_invocation(invocation: Invocation) -> Result<()> {
    let manager = match invocation.config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    if invocation.init_config {
        let written = manager.initialize().await?;
        let status = if written { "Wrote" } else { "Kept existing" };
        println!("{status} configuration at {}", manager.config_path().display());
        return Ok(());
    }

    let config = manager.load_config()?;
    init_logging_with_config(&config.logging).context("Failed to initialize logging")?;
    log_system_info(&config.logging);

    let use_cases = build_use_cases(&config)?;
    info!("🚀 Session {} started", use_cases.session().id());

    match invocation.command {
        Some(line) => {
            if let CommandOutcome::Continue(output) = execute_line(&use_cases, &line).await {
                println!("{output}");
            }
            Ok(())
        }
        None => run_shell(&use_cases).await,
    }
}

/// Wire the HTTP backend, access layer and a fresh page session
pub fn build_use_cases(config: &AppConfig) -> Result<SearchUseCases> {
    let backend = HttpSearchBackend::new(config.api.clone())
        .context("Failed to create HTTP client for the search service")?;

    let service = ApiService::new(Arc::new(backend))
        .with_hits_per_platform(config.search.hits_per_platform)
        .with_initial_keyword(config.search.initial_keyword.clone());

    Ok(SearchUseCases::new(service, SearchSession::new()))
}

/// Interactive session: initial load, then one command per line until quit/EOF
async fn run_shell(use_cases: &SearchUseCases) -> Result<()> {
    println!("{}\n", ui::TITLE);
    use_cases.load_initial_products().await;
    println!("{}\n", render_screen(use_cases).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{PROMPT}");
        if let Err(e) = std::io::stdout().flush() {
            warn!("Failed to flush prompt: {}", e);
        }

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match execute_line(use_cases, &line).await {
            CommandOutcome::Continue(output) => println!("{output}\n"),
            CommandOutcome::Quit => break,
        }
    }

    info!("👋 Session {} finished", use_cases.session().id());
    Ok(())
}
