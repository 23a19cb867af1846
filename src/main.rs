use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod config;
mod error;
mod hosts;
mod models;
mod selector;
mod ssh_service;
mod ui;

use app::{Outcome, Selection, SelectorDefaults};
use config::ConfigManager;
use error::SelectError;
use ssh_service::SshCommand;

/// Connect to an SSH host, with an interactive selector
#[derive(Debug, Parser)]
#[command(
    name = "sshpick",
    version,
    override_usage = "sshpick [OPTIONS] [HOST] [-- SSH_OPTIONS... [-- REMOTE_COMMAND...]]"
)]
struct Cli {
    /// Print the ssh command instead of running it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Open a SOCKS proxy on 0.0.0.0:1080 instead of a shell
    #[arg(short, long)]
    proxy: bool,

    /// Print unreadable host sources after the selector closes
    #[arg(short, long)]
    verbose: bool,

    /// Alternative sshpick.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Connect directly, skipping the selector
    host: Option<String>,

    /// SSH options, then `--` and the remote command
    #[arg(last = true, allow_hyphen_values = true)]
    passthrough: Vec<String>,
}

/// `-A -- uptime` -> (`[-A]`, `[uptime]`)
fn split_passthrough(args: &[String]) -> (Vec<String>, Vec<String>) {
    match args.iter().position(|a| a == "--") {
        Some(sep) => (args[..sep].to_vec(), args[sep + 1..].to_vec()),
        None => (args.to_vec(), Vec::new()),
    }
}

fn init_logging() -> Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("sshpick")
        .join("logs");
    fs::create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!(
        "sshpick_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = File::create(&log_file)?;

    fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(EnvFilter::from_default_env().add_directive("sshpick=debug".parse()?))
        .with_ansi(false)
        .with_writer(file)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(log_file)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // The selector owns the screen, so logs only go to a file
    match init_logging() {
        Ok(path) => debug!("Logging to {:?}", path),
        Err(e) => {
            if cli.verbose {
                eprintln!("sshpick: logging disabled: {}", e);
            }
        }
    }

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_file(path.clone()),
        None => ConfigManager::new()?,
    };
    debug!("Config file: {:?}", manager.config_path());
    let app_config = manager.load_config()?;
    let (ssh_options, remote_command) = split_passthrough(&cli.passthrough);

    let selection = match cli.host.clone() {
        Some(target) => Selection {
            target,
            proxy_jump: String::new(),
            options: ssh_options,
            command: remote_command,
        },
        None => {
            let report = hosts::load_catalog(&app_config.source_paths()).await;

            let mut options: Vec<String> = app_config.default_options.clone().into_iter().collect();
            options.extend(ssh_options);
            let defaults = SelectorDefaults {
                options: options.join(" "),
                command: remote_command.join(" "),
                ..Default::default()
            };

            let outcome = selector::run_blocking(report.catalog, defaults);

            if cli.verbose {
                for warning in &report.warnings {
                    eprintln!("sshpick: warning: {}", warning);
                }
            }

            match outcome {
                Ok(Outcome::Confirmed(selection)) => selection,
                Ok(Outcome::Cancelled) => {
                    tracing::info!("No host selected");
                    return Ok(ExitCode::SUCCESS);
                }
                Err(e @ SelectError::EmptyCatalog) | Err(e @ SelectError::TerminalUnavailable(_)) => {
                    tracing::error!("{}", e);
                    eprintln!("sshpick: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    let (user, host, port) = ssh_service::split_target(&selection.target);
    debug!(?user, host, ?port, jump = %selection.proxy_jump, "Connecting");

    let command = if cli.proxy {
        SshCommand::socks_proxy(&selection)
    } else {
        SshCommand::interactive(&selection)
    };

    if cli.dry_run {
        println!("{}", command.display());
        return Ok(ExitCode::SUCCESS);
    }

    let status = command.run()?;
    Ok(status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn passthrough_splits_on_second_separator() {
        let (options, command) = split_passthrough(&strings(&["-A", "-p", "22", "--", "ls", "-la"]));
        assert_eq!(options, strings(&["-A", "-p", "22"]));
        assert_eq!(command, strings(&["ls", "-la"]));

        let (options, command) = split_passthrough(&strings(&["-v"]));
        assert_eq!(options, strings(&["-v"]));
        assert!(command.is_empty());
    }

    #[test]
    fn cli_parses_host_and_passthrough() {
        let cli = Cli::try_parse_from(["sshpick", "-n", "web", "--", "-A", "--", "uptime"]).unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.host.as_deref(), Some("web"));
        assert_eq!(cli.passthrough, strings(&["-A", "--", "uptime"]));
    }

    #[test]
    fn cli_without_host_opens_selector() {
        let cli = Cli::try_parse_from(["sshpick", "--proxy"]).unwrap();
        assert!(cli.proxy);
        assert!(cli.host.is_none());
        assert!(cli.passthrough.is_empty());
    }
}
