//! # Mileage
//!
//! Client for a vehicle mileage logging service. Lists trips and monthly
//! running-kilometre totals, adds, edits and deletes trips, and downloads
//! the monthly PDF report.
//!
//! ## Modules
//!
//! - [`api`]: REST contract of the service and its reqwest transport
//! - [`client`]: the [`LogClient`] operations, forms and view model
//! - [`terminal`]: terminal implementation of the client's dialogs
//! - [`output`]: table, JSON and CSV rendering of the view
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mileage::{Config, HttpLogApi, LogClient, Terminal};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let mut client = LogClient::new(HttpLogApi::new(&config.api)?);
//!
//!     client.load_logs().await?;
//!     println!("{}", mileage::output::render_table(client.view()));
//!
//!     // Ask before deleting the first entry
//!     client.delete_entry(0, &mut Terminal::stdio()).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod format;
pub mod output;
pub mod report;
pub mod terminal;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, HttpLogApi, LogApi, LogEntry, LogUpdate, LogsResponse, NewLogEntry};

pub use client::{
    ClientError, EditForm, EntryForm, Interaction, LogClient, LogView, Outcome, Status,
    ValidationError,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, ReportConfig};

pub use format::format_date;
pub use output::{OutputError, OutputFormat};
pub use report::REPORT_FILE_NAME;
pub use terminal::Terminal;
