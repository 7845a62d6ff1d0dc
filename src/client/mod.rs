//! Mileage Log Client
//!
//! [`LogClient`] drives the mileage log: it loads and renders entries and
//! monthly totals, validates and submits new entries, edits and deletes
//! entries by position, and saves the monthly report.
//!
//! Every operation is a single request chain: validate, send, then reload.
//! Nothing is cached between operations and nothing is updated
//! optimistically, so the view only changes after a successful reload.
//!
//! # Failures
//!
//! A failed request stops its chain. The rows of the last successful load
//! stay on screen, the view status turns into an error, and the error is
//! returned. There is no retry and no rollback.
//!
//! # Positional addressing
//!
//! Edit and delete address an entry by its index in the last fetched list.
//! If another client changes the log in between, the index may point at a
//! different row. This mirrors the service contract and is not corrected
//! here.

mod edit;
mod error;
mod form;
mod interaction;
mod view;

pub use edit::EditForm;
pub use error::{ClientError, ValidationError};
pub use form::{parse_km, EntryForm};
pub use interaction::Interaction;
pub use view::{EntryRow, LogView, MonthlyRow, Status};

use std::path::{Path, PathBuf};

use crate::api::LogApi;
use crate::report;

/// Question asked before deleting an entry
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this entry?";

/// How a user-triggered operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Request sent and the log reloaded
    Applied,
    /// Input rejected and alerted, nothing sent
    Rejected(ValidationError),
    /// User declined or dismissed the dialog, nothing sent
    Cancelled,
}

/// Client state: the add-entry form and the view of the last load
pub struct LogClient<A> {
    api: A,
    form: EntryForm,
    view: LogView,
}

impl<A: LogApi> LogClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: EntryForm::default(),
            view: LogView::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &LogView {
        &self.view
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// Inputs of the add-entry form
    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    /// Fetch entries and monthly totals and rebuild the view
    pub async fn load_logs(&mut self) -> Result<(), ClientError> {
        match self.api.fetch_logs().await {
            Ok(response) => {
                self.view = LogView::render(&response);
                tracing::debug!(
                    entries = self.view.entries.len(),
                    months = self.view.monthly_totals.len(),
                    "Rendered mileage log"
                );
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Validate the form and create an entry from it.
    ///
    /// On success the form is cleared and the log reloaded.
    pub async fn add_entry(&mut self, ui: &mut impl Interaction) -> Result<Outcome, ClientError> {
        let entry = match self.form.validate() {
            Ok(entry) => entry,
            Err(rejection) => return Ok(reject(ui, rejection)),
        };

        if let Err(e) = self.api.create_log(&entry).await {
            return Err(self.fail(e.into()));
        }
        tracing::info!(date = %entry.date, running_km = entry.running_km, "Created log entry");

        self.form.clear();
        self.load_logs().await?;
        Ok(Outcome::Applied)
    }

    /// Edit the entry at `index` through the edit dialog.
    ///
    /// The current list is fetched first so the dialog shows fresh values.
    /// The date is never part of the update.
    pub async fn edit_entry(
        &mut self,
        index: usize,
        ui: &mut impl Interaction,
    ) -> Result<Outcome, ClientError> {
        let response = match self.api.fetch_logs().await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e.into())),
        };

        let Some(entry) = response.logs.get(index) else {
            let len = response.logs.len();
            return Err(self.fail(ClientError::NoSuchEntry { index, len }));
        };

        let Some(answers) = ui.edit_dialog(entry) else {
            tracing::debug!(index, "Edit dialog dismissed");
            return Ok(Outcome::Cancelled);
        };

        let update = match answers.apply(entry) {
            Ok(update) => update,
            Err(rejection) => return Ok(reject(ui, rejection)),
        };

        if let Err(e) = self.api.update_log(index, &update).await {
            return Err(self.fail(e.into()));
        }
        tracing::info!(index, running_km = update.running_km, "Updated log entry");

        self.load_logs().await?;
        Ok(Outcome::Applied)
    }

    /// Delete the entry at `index` once the user confirms
    pub async fn delete_entry(
        &mut self,
        index: usize,
        ui: &mut impl Interaction,
    ) -> Result<Outcome, ClientError> {
        if !ui.confirm(DELETE_CONFIRMATION) {
            return Ok(Outcome::Cancelled);
        }

        if let Err(e) = self.api.delete_log(index).await {
            return Err(self.fail(e.into()));
        }
        tracing::info!(index, "Deleted log entry");

        self.load_logs().await?;
        Ok(Outcome::Applied)
    }

    /// Download the monthly report into `dir`, returning the saved path
    pub async fn download_monthly_report(&mut self, dir: &Path) -> Result<PathBuf, ClientError> {
        let contents = match self.api.fetch_monthly_report().await {
            Ok(contents) => contents,
            Err(e) => return Err(self.fail(e.into())),
        };

        match report::save_report(dir, &contents) {
            Ok(path) => {
                tracing::info!(path = ?path, bytes = contents.len(), "Saved monthly report");
                Ok(path)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Record a failed chain on the view and hand the error back
    fn fail(&mut self, error: ClientError) -> ClientError {
        tracing::warn!(error = %error, "Mileage request failed");
        self.view.fail(error.to_string());
        error
    }
}

fn reject(ui: &mut impl Interaction, rejection: ValidationError) -> Outcome {
    ui.alert(&rejection.to_string());
    Outcome::Rejected(rejection)
}
