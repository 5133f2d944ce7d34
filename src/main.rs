use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cmd;

use taskdeck::config::Config;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version, about = "Terminal kanban client for the Task Manager API")]
pub struct Cli {
    /// Backend base URL. Overrides TASKDECK_API_URL and the config file.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Debug-level logging for this crate (written to the log file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive task board (the default)
    Board,
    /// View or bootstrap configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A .env in the working directory may supply TASKDECK_* variables;
    // its absence is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::load(cli.api_url.as_deref(), cli.verbose)?;

    match cli.command {
        None | Some(Commands::Board) => {
            let _log_guard = init_logging(&config)?;
            cmd::cmd_board(&config).await?;
        }
        Some(Commands::Config { command }) => cmd::cmd_config(&config, command)?,
    }

    Ok(())
}

/// File-based logging. The board owns the terminal via the alternate
/// screen, so tracing output goes to a daily-rolled file instead of stderr.
/// The returned guard must stay alive for the non-blocking writer to flush.
fn init_logging(config: &Config) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = Config::log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory at {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::daily(&log_dir, "taskdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}
