use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bevy::prelude::*;
use clap::Parser;

use engine::config::EngineConfig;

mod agent_mode;

/// Headless smart parking engine driven by newline-delimited JSON commands.
#[derive(Parser)]
#[command(name = "smart_parking", version)]
struct Cli {
    /// JSON engine config (rate, penalty, initial zones, slot id stride).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut app = agent_mode::headless_app();
    let config = cli
        .config
        .as_deref()
        .map(load_config)
        .unwrap_or_default();
    agent_mode::install_engine(&mut app, config);

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    let outcome = match cli.script.as_deref() {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => {
                info!("Running script {}", path.display());
                agent_mode::run_session(&mut app, std::io::BufReader::new(file), &mut stdout)
            }
            Err(e) => {
                error!("Cannot open script {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => agent_mode::run_session(&mut app, std::io::stdin().lock(), &mut stdout),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Session aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Read an engine config file, falling back to defaults when it is missing or
/// malformed.
fn load_config(path: &Path) -> EngineConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read config {}: {}, using defaults", path.display(), e);
            return EngineConfig::default();
        }
    };
    match EngineConfig::from_json(&text) {
        Ok(config) => {
            info!("Loaded engine config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Bad config {}: {}, using defaults", path.display(), e);
            EngineConfig::default()
        }
    }
}
