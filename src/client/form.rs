//! Add-entry form
//!
//! Holds the raw text of the four input fields and validates it into a
//! create request.

use crate::api::NewLogEntry;

use super::error::ValidationError;

/// Raw contents of the add-entry inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub date: String,
    pub start_km: String,
    pub end_km: String,
    pub purpose: String,
}

impl EntryForm {
    pub fn new(
        date: impl Into<String>,
        start_km: impl Into<String>,
        end_km: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            start_km: start_km.into(),
            end_km: end_km.into(),
            purpose: purpose.into(),
        }
    }

    /// Validate the fields, in order:
    ///
    /// 1. date and purpose non-empty, both readings numeric
    /// 2. end reading not below the start reading
    pub fn validate(&self) -> Result<NewLogEntry, ValidationError> {
        let (Some(start), Some(end)) = (parse_km(&self.start_km), parse_km(&self.end_km)) else {
            return Err(ValidationError::IncompleteFields);
        };
        if self.date.is_empty() || self.purpose.is_empty() {
            return Err(ValidationError::IncompleteFields);
        }

        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }
        if end.checked_sub(start).is_none() {
            return Err(ValidationError::IncompleteFields);
        }

        Ok(NewLogEntry::new(self.date.clone(), start, end, self.purpose.clone()))
    }

    /// Empty every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Largest reading magnitude accepted, `2^53 - 1`
pub const MAX_KM: i64 = (1 << 53) - 1;

/// Parse an odometer reading leniently: skip leading whitespace, accept an
/// optional sign, then take the longest run of digits. `"42km"` is 42,
/// `"km42"` is not a number, and a `0x` prefix reads hex digits.
///
/// Readings beyond [`MAX_KM`] do not parse, so the distance between any
/// two parsed readings fits in an `i64`.
pub fn parse_km(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits = rest
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if digits == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&rest[..digits], radix)
        .ok()
        .filter(|m| *m <= MAX_KM)?;
    Some(if negative { -magnitude } else { magnitude })
}
