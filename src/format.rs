//! Date display helpers

/// Placeholder for a date segment that is not present in the input
const MISSING_SEGMENT: &str = "undefined";

/// Reorder an ISO `YYYY-MM-DD` date into `DD-MM-YYYY`.
///
/// Lenient on purpose: the input is not validated. Missing segments render
/// as `undefined` and anything after the third segment is dropped.
pub fn format_date(date: &str) -> String {
    let mut segments = date.split('-');
    let year = segments.next().unwrap_or(MISSING_SEGMENT);
    let month = segments.next().unwrap_or(MISSING_SEGMENT);
    let day = segments.next().unwrap_or(MISSING_SEGMENT);

    format!("{}-{}-{}", day, month, year)
}
