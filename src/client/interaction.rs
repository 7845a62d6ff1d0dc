//! User interaction seam
//!
//! The client never talks to a terminal or window directly. Alerts,
//! confirmations and the edit dialog go through this trait.

use crate::api::LogEntry;

use super::edit::EditForm;

/// Dialogs the client needs from whatever hosts it
pub trait Interaction {
    /// Show a message the user has to acknowledge
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; `false` when declined
    fn confirm(&mut self, message: &str) -> bool;

    /// Collect new values for `current`, or `None` if the dialog was dismissed
    fn edit_dialog(&mut self, current: &LogEntry) -> Option<EditForm>;
}
