//! View model
//!
//! Everything the client shows is derived from the last successful
//! `GET /api/logs`. A reload replaces the whole view; rows are never
//! patched in place.

use serde::Serialize;

use crate::api::LogsResponse;
use crate::format::format_date;

/// One rendered log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    /// Position in the fetched list, the address used by edit and delete
    pub index: usize,
    /// Display date, `DD-MM-YYYY`
    pub date: String,
    pub starting_km: i64,
    pub end_km: i64,
    pub running_km: i64,
    pub purpose: String,
}

/// One rendered month/total pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub month: String,
    pub total: f64,
}

/// Outcome of the most recent request chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum Status {
    /// Nothing fetched yet
    #[default]
    Idle,
    Loaded,
    /// Last request failed; rows still show the previous successful load
    Error(String),
}

/// Renderable state of the mileage log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogView {
    pub entries: Vec<EntryRow>,
    pub monthly_totals: Vec<MonthlyRow>,
    pub status: Status,
}

impl LogView {
    /// Build the view for a fetched response, keeping response order
    pub fn render(response: &LogsResponse) -> Self {
        let entries = response
            .logs
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryRow {
                index,
                date: format_date(&entry.date),
                starting_km: entry.starting_km,
                end_km: entry.end_km,
                running_km: entry.running_km,
                purpose: entry.purpose.clone(),
            })
            .collect();

        let monthly_totals = response
            .monthly_totals
            .iter()
            .map(|total| MonthlyRow {
                month: total.month.clone(),
                total: total.total,
            })
            .collect();

        Self {
            entries,
            monthly_totals,
            status: Status::Loaded,
        }
    }

    /// Mark the view as failed without touching the rendered rows
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = Status::Error(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }
}
