//! Vigil CLI - live configuration panel

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vigil::config::{Aliases, VigilConfig};
use vigil::control::{ControlAddr, Controller};
use vigil::error::{FixSuggestion, Result, VigilError};
use vigil::tui::{run_tui, ConfigPanel};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Vigil - live configuration panel for daemon and local settings")]
#[command(version)]
struct Cli {
    /// Control interface as [ADDRESS:]PORT (default 127.0.0.1:9751)
    #[arg(short, long, value_name = "[ADDRESS:]PORT")]
    interface: Option<ControlAddr>,

    /// Unix control socket (takes precedence over --interface)
    #[cfg(unix)]
    #[arg(short, long, value_name = "PATH")]
    socket: Option<PathBuf>,

    /// Config file (default <config_dir>/vigil/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show the local settings store instead of querying the daemon
    #[arg(short, long)]
    local: bool,

    /// Write debug logs to PATH
    #[arg(short, long, value_name = "PATH")]
    debug: Option<PathBuf>,

    /// Log filter directives, e.g. "vigil=debug" (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => VigilConfig::load_from(path)?,
        None => VigilConfig::load()?,
    };
    let config = config.with_env();

    init_logging(cli.log.as_deref(), &config.log.filter, cli.debug.as_deref())?;

    let refresh = Duration::from_millis(config.refresh.interval_ms);

    let panel = if cli.local {
        info!("starting in local mode");
        let store = config.local_store();
        ConfigPanel::local(&store).await?
    } else {
        let mut controller = connect_controller(&cli, &config).await?;
        let aliases = Aliases::merged(config.aliases.clone());
        let panel = ConfigPanel::daemon(&mut controller, &aliases).await?;
        controller.quit().await;
        panel
    };

    debug!(entries = panel.len(), "snapshot loaded");
    run_tui(Arc::new(panel), refresh).await
}

/// Open the control channel: the socket path when given, TCP otherwise.
async fn connect_controller(cli: &Cli, config: &VigilConfig) -> Result<Controller> {
    #[cfg(unix)]
    {
        if let Some(path) = &cli.socket {
            info!(socket = %path.display(), "connecting to control socket");
            return Controller::connect_socket(path).await;
        }
    }

    let addr = match cli.interface {
        Some(addr) => addr,
        None => ControlAddr::from_parts(&config.connection.address, config.connection.port)?,
    };
    info!(%addr, "connecting to control interface");
    Controller::connect(addr).await
}

/// Stay quiet unless asked: the panel owns the terminal, so stderr
/// output only appears once the alternate screen is torn down.
/// Filter precedence: `--log`, then the config file, then `RUST_LOG`.
fn init_logging(
    cli_filter: Option<&str>,
    config_filter: &str,
    debug_path: Option<&Path>,
) -> Result<()> {
    let directives = cli_filter.unwrap_or(config_filter);
    let filter = if directives.is_empty() {
        EnvFilter::try_from_default_env().ok()
    } else {
        Some(EnvFilter::new(directives))
    };

    let filter = match (filter, debug_path) {
        (Some(filter), _) => filter,
        (None, Some(_)) => EnvFilter::new("vigil=debug"),
        (None, None) => return Ok(()),
    };

    match debug_path {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| VigilError::LogFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
