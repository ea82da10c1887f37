mod config;
mod config_cmd;
mod doctor_cmd;
mod scan_cmd;
mod terminal_output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use menuscan_config::{load_and_prepare, log_report};
use menuscan_core::MenuScanError;
use menuscan_logging::init_logger;
use tracing::error;

use terminal_output::{note_error, note_info};

/// Exit code for missing endpoints or credentials.
const EXIT_CONFIGURATION: u8 = 2;

#[derive(Parser)]
#[command(name = "menuscan")]
#[command(about = "Extract text from menu photos and distill it into menu items")]
#[command(version)]
struct Cli {
    /// Config file (default: $MENUSCAN_CONFIG_DIR/config.yaml or ~/.menuscan/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text lines and their boxes from an image
    Ocr {
        image: PathBuf,
        /// Declared content type (inferred from the extension otherwise)
        #[arg(long)]
        content_type: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Extract text from an image and distill it into menu item names
    Menu {
        image: PathBuf,
        #[arg(long)]
        content_type: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Check endpoints, credentials and config validity
    Doctor,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective config with credentials masked
    Show,
    /// Print the config file path
    Path,
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => report_failure(&e),
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = config::resolve_config_path(cli.config.as_deref());

    // `config path` and `config init` must work even when the file is broken.
    if let Commands::Config { command } = &cli.command {
        match command {
            ConfigCommands::Path => {
                println!("{}", config_path.display());
                return Ok(ExitCode::SUCCESS);
            }
            ConfigCommands::Init { force } => {
                config_cmd::init(&config_path, *force).await?;
                return Ok(ExitCode::SUCCESS);
            }
            ConfigCommands::Show => {}
        }
    }

    let (config, report) = load_and_prepare(&config_path).await?;
    init_logger(&config::logger_options(&config));
    log_report(&report);

    match cli.command {
        Commands::Ocr {
            image,
            content_type,
            json,
        } => scan_cmd::run_ocr(&config, &image, content_type, json).await?,
        Commands::Menu {
            image,
            content_type,
            json,
        } => scan_cmd::run_menu(&config, &image, content_type, json).await?,
        Commands::Config { .. } => config_cmd::show(&config, &config_path)?,
        Commands::Doctor => {
            if !doctor_cmd::run(&config, &config_path) {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report_failure(err: &anyhow::Error) -> ExitCode {
    error!(error = %err, "Command failed");
    match err.downcast_ref::<MenuScanError>() {
        Some(e) if e.is_configuration() => {
            note_error(&e.to_string());
            note_info(
                "Set the endpoints and keys in the config file (`menuscan config init`) \
                 or via CLOVA_OCR_API_URL, CLOVA_OCR_SECRET_KEY and OPENAI_API_KEY.",
            );
            ExitCode::from(EXIT_CONFIGURATION)
        }
        Some(MenuScanError::Io { .. }) => {
            note_error(&format!("Processing failed: {err}"));
            ExitCode::FAILURE
        }
        _ => {
            note_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
