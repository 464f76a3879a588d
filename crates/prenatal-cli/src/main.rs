use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use prenatal_cli::{commands, config};

/// Prenatal serum screening risk calculator.
#[derive(Debug, Parser)]
#[command(name = "prenatal", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, env = "PRENATAL_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a screening request (JSON) and append it to the history.
    Assess {
        /// Request file, or `-` for stdin.
        request: Option<PathBuf>,
        /// Do not append the result to the history.
        #[arg(long)]
        no_save: bool,
        /// Print a text summary instead of the JSON record.
        #[arg(long)]
        summary: bool,
    },
    /// Print stored assessments.
    History {
        #[arg(long)]
        patient: Option<String>,
        /// Only the most recent assessment per patient.
        #[arg(long)]
        latest: bool,
    },
    /// Manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Write a default config file.
    Init {
        #[arg(long)]
        history_path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Assess {
            request,
            no_save,
            summary,
        } => {
            let app_config = config::load_config(&config_path)?;
            let request = commands::read_request(request.as_deref(), std::io::stdin())?;
            commands::assess(&app_config, &request, !no_save, summary, &mut stdout)?;
        }
        Command::History { patient, latest } => {
            let app_config = config::load_config(&config_path)?;
            commands::history(&app_config, patient.as_deref(), latest, &mut stdout)?;
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                let app_config = config::load_config(&config_path)?;
                writeln!(stdout, "{}", serde_json::to_string_pretty(&app_config)?)?;
            }
            ConfigAction::Init { history_path } => {
                let mut app_config = config::AppConfig::default();
                if let Some(path) = history_path {
                    app_config.history_path = path;
                }
                config::save_config(&config_path, &app_config)?;
            }
        },
    }

    Ok(())
}
