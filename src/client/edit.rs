//! Edit dialog answers
//!
//! All three editable fields are collected at once. A blank answer keeps
//! the current value, and so does a non-numeric answer for a reading.

use crate::api::{LogEntry, LogUpdate};

use super::error::ValidationError;
use super::form::parse_km;

/// Answers given in the edit dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub start_km: String,
    pub end_km: String,
    pub purpose: String,
}

impl EditForm {
    pub fn new(
        start_km: impl Into<String>,
        end_km: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            start_km: start_km.into(),
            end_km: end_km.into(),
            purpose: purpose.into(),
        }
    }

    /// Dialog pre-filled with the entry's current values
    pub fn prefilled(entry: &LogEntry) -> Self {
        Self::new(
            entry.starting_km.to_string(),
            entry.end_km.to_string(),
            entry.purpose.clone(),
        )
    }

    /// Merge the answers over `entry` and build the update request.
    ///
    /// The range is only re-checked when a reading actually changed, so an
    /// entry the service already holds with `end < start` can still have its
    /// purpose edited.
    ///
    /// Readings come back from the service truncated to whole kilometres
    /// (see [`LogEntry`]), so a blank answer on an entry stored as `1250.5`
    /// sends `1250` and rewrites the stored value.
    pub fn apply(&self, entry: &LogEntry) -> Result<LogUpdate, ValidationError> {
        let start = parse_km(&self.start_km).unwrap_or(entry.starting_km);
        let end = parse_km(&self.end_km).unwrap_or(entry.end_km);
        let purpose = if self.purpose.is_empty() {
            entry.purpose.clone()
        } else {
            self.purpose.clone()
        };

        let readings_changed = start != entry.starting_km || end != entry.end_km;
        if readings_changed && end < start {
            return Err(ValidationError::EndBeforeStart);
        }
        if end.checked_sub(start).is_none() {
            return Err(ValidationError::IncompleteFields);
        }

        Ok(LogUpdate::new(start, end, purpose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> LogEntry {
        LogEntry {
            date: "2024-05-07".to_string(),
            starting_km: 1200,
            end_km: 1250,
            running_km: 50,
            purpose: "Client visit".to_string(),
        }
    }

    #[test]
    fn test_blank_answers_keep_everything() {
        let update = EditForm::default().apply(&entry()).unwrap();
        assert_eq!(update, LogUpdate::new(1200, 1250, "Client visit"));
        assert_eq!(update.running_km, 50);
    }

    #[test]
    fn test_prefilled_answers_keep_everything() {
        let update = EditForm::prefilled(&entry()).apply(&entry()).unwrap();
        assert_eq!(update, LogUpdate::new(1200, 1250, "Client visit"));
    }

    #[test]
    fn test_non_numeric_is_same_as_blank() {
        let blank = EditForm::new("", "", "Airport").apply(&entry()).unwrap();
        let garbage = EditForm::new("abc", "n/a", "Airport").apply(&entry()).unwrap();
        assert_eq!(blank, garbage);
    }

    #[test]
    fn test_changed_readings_recompute_running() {
        let update = EditForm::new("1210", "1300", "").apply(&entry()).unwrap();
        assert_eq!(update.starting_km, 1210);
        assert_eq!(update.end_km, 1300);
        assert_eq!(update.running_km, 90);
        assert_eq!(update.purpose, "Client visit");
    }

    #[test]
    fn test_changed_readings_out_of_range() {
        let result = EditForm::new("", "1100", "").apply(&entry());
        assert_eq!(result, Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn test_equal_readings_after_edit() {
        let update = EditForm::new("1250", "", "").apply(&entry()).unwrap();
        assert_eq!(update.running_km, 0);
    }

    #[test]
    fn test_unchanged_bad_range_is_not_rechecked() {
        let mut stored = entry();
        stored.starting_km = 2000;
        stored.running_km = -750;

        let update = EditForm::new("", "", "Fixed later").apply(&stored).unwrap();

        assert_eq!(update.starting_km, 2000);
        assert_eq!(update.end_km, 1250);
        assert_eq!(update.running_km, -750);
        assert_eq!(update.purpose, "Fixed later");
    }

    #[test]
    fn test_blank_edit_resends_truncated_reading() {
        let stored: LogEntry = serde_json::from_str(
            r#"{"Date": "2024-05-07", "Starting Km": 1200, "End Km": 1250.5, "Running Km": 50.5, "Purpose": "Client visit"}"#,
        )
        .unwrap();

        let update = EditForm::default().apply(&stored).unwrap();

        assert_eq!(update, LogUpdate::new(1200, 1250, "Client visit"));
    }

    #[test]
    fn test_extreme_stored_readings_do_not_panic() {
        let mut stored = entry();
        stored.starting_km = i64::MIN + 1;
        stored.end_km = i64::MAX;

        let result = EditForm::new("", "", "Trip").apply(&stored);
        assert_eq!(result, Err(ValidationError::IncompleteFields));

        let update = EditForm::new("-9007199254740991", "9007199254740991", "")
            .apply(&stored)
            .unwrap();
        assert_eq!(update.running_km, 18014398509481982);
    }
}
