//! Mileage CLI
//!
//! Command-line client for the mileage log service:
//! - List trips and monthly totals
//! - Add, edit and delete trips
//! - Download the monthly report

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mileage::config::{self, Config, LoggingConfig};
use mileage::output::{self, OutputFormat};
use mileage::{EditForm, EntryForm, HttpLogApi, LogClient, Outcome, Terminal};

#[derive(Parser)]
#[command(name = "mileage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vehicle mileage log client")]
#[command(long_about = "Mileage keeps a log of vehicle trips on a mileage log service.\nEntries are addressed by their position in the listing (the # column).")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Config file (default: ~/.config/mileage/config.toml or ./mileage.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List trips and monthly totals
    List,

    /// Log a trip
    Add {
        /// Trip date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Odometer reading at the start
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        start_km: String,
        /// Odometer reading at the end
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        end_km: String,
        /// What the trip was for
        #[arg(short, long, default_value = "")]
        purpose: String,
    },

    /// Edit the trip at a position; prompts unless a field flag is given
    Edit {
        /// Position shown in the # column
        index: usize,
        /// New starting reading (blank or non-numeric keeps the current one)
        #[arg(short, long, allow_hyphen_values = true)]
        start_km: Option<String>,
        /// New end reading (blank or non-numeric keeps the current one)
        #[arg(short, long, allow_hyphen_values = true)]
        end_km: Option<String>,
        /// New purpose (blank keeps the current one)
        #[arg(short, long)]
        purpose: Option<String>,
    },

    /// Delete the trip at a position (asks for confirmation)
    Delete {
        /// Position shown in the # column
        index: usize,
    },

    /// Download the monthly running-kilometre report (PDF)
    Report {
        /// Directory to save into (default: configured download dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::discover);
    let mut config = match &config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config.logging);
    tracing::debug!(config = ?config_path, api = %config.api.base_url, "Configuration loaded");

    let api = HttpLogApi::new(&config.api).context("failed to build HTTP client")?;
    let mut client = LogClient::new(api);
    let mut terminal = Terminal::stdio();

    let outcome = match cli.command {
        Commands::List => {
            client.load_logs().await?;
            Outcome::Applied
        }

        Commands::Add {
            date,
            start_km,
            end_km,
            purpose,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            *client.form_mut() = EntryForm::new(date, start_km, end_km, purpose);
            client.add_entry(&mut terminal).await?
        }

        Commands::Edit {
            index,
            start_km,
            end_km,
            purpose,
        } => {
            if start_km.is_some() || end_km.is_some() || purpose.is_some() {
                terminal = terminal.with_edit_answers(EditForm::new(
                    start_km.unwrap_or_default(),
                    end_km.unwrap_or_default(),
                    purpose.unwrap_or_default(),
                ));
            }
            client.edit_entry(index, &mut terminal).await?
        }

        Commands::Delete { index } => client.delete_entry(index, &mut terminal).await?,

        Commands::Report { output_dir } => {
            let dir = output_dir.unwrap_or_else(|| config.report.download_dir());
            let path = client.download_monthly_report(&dir).await?;
            println!("Saved {}", path.display());
            return Ok(ExitCode::SUCCESS);
        }

        Commands::Config { output } => {
            write_default_config(output.as_ref())?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    match outcome {
        Outcome::Applied => {
            print!("{}", output::render(client.view(), cli.format)?);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Cancelled => Ok(ExitCode::SUCCESS),
        Outcome::Rejected(_) => Ok(ExitCode::FAILURE),
    }
}

/// Initialize tracing on stderr, honouring `RUST_LOG` over the config
fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mileage={}", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &content)
                .with_context(|| format!("failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }

    Ok(())
}
