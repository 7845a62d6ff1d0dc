//! Mileage Service API
//!
//! The REST contract of the remote mileage log service:
//!
//! ```text
//! GET    /api/logs             -> { logs: [...], monthly_totals: {...} }
//! POST   /api/logs             <- { Date, Starting Km, End Km, Running Km, Purpose }
//! PUT    /api/logs/{index}     <- { Starting Km, End Km, Running Km, Purpose }
//! DELETE /api/logs/{index}
//! GET    /api/monthly_report   -> application/pdf
//! ```
//!
//! Entries are addressed by their position in the last fetched list, not by
//! a stable identifier. A position is only meaningful until the next fetch.

pub mod dto;
pub mod error;
pub mod http;

pub use dto::{LogEntry, LogUpdate, LogsResponse, MonthlyTotal, MonthlyTotals, NewLogEntry};
pub use error::{ApiError, ApiResult};
pub use http::HttpLogApi;

use async_trait::async_trait;

/// Operations the mileage log service exposes
#[async_trait]
pub trait LogApi: Send + Sync {
    /// Fetch every entry plus the monthly totals
    async fn fetch_logs(&self) -> ApiResult<LogsResponse>;

    /// Append a new entry
    async fn create_log(&self, entry: &NewLogEntry) -> ApiResult<()>;

    /// Overwrite the entry at `index`
    async fn update_log(&self, index: usize, update: &LogUpdate) -> ApiResult<()>;

    /// Remove the entry at `index`
    async fn delete_log(&self, index: usize) -> ApiResult<()>;

    /// Download the generated monthly report (PDF bytes)
    async fn fetch_monthly_report(&self) -> ApiResult<Vec<u8>>;
}
