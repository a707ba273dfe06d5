mod scenario;

use clap::{Parser, Subcommand};
use rangetouch::settings::{self, Settings};
use scenario::Scenario;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rangetouch-replay", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Scenario file (JSON) with the controls and the touch events to replay
    scenario: Option<PathBuf>,

    /// Settings file to load instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Thumb width in pixels (overrides settings)
    #[arg(short = 't', long)]
    thumb_width: Option<f64>,

    /// Selector for handled controls (overrides settings)
    #[arg(short = 's', long)]
    selector: Option<String>,

    /// Clamp values into min/max after thumb compensation
    #[arg(long)]
    clamp: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write a default settings file (at --config if given) and print its path
    InitConfig,
    /// Print the effective settings as JSON
    Settings,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::InitConfig) => {
            let path = settings::write_default_config(cli.config.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Commands::Settings) => {
            println!("{}", serde_json::to_string_pretty(&effective_settings(&cli)?)?);
            Ok(())
        }
        None => {
            if let Some(path) = &cli.scenario {
                replay(path, effective_settings(&cli)?)
            } else {
                use clap::CommandFactory;
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}

fn effective_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = settings::load_settings(cli.config.as_deref())?;
    if let Some(width) = cli.thumb_width {
        if !width.is_finite() || width < 0.0 {
            anyhow::bail!("Thumb width must be a non-negative number, got {}", width);
        }
        settings.thumb_width = width;
    }
    if let Some(selector) = &cli.selector {
        settings.selector = selector.as_str().into();
    }
    if cli.clamp {
        settings.clamp_to_bounds = true;
    }
    Ok(settings)
}

fn replay(path: &Path, settings: Settings) -> anyhow::Result<()> {
    let scenario = Scenario::load(path)?;
    for step in scenario.replay(settings)? {
        println!("{}", step);
    }
    Ok(())
}
