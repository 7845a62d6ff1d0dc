//! Wire Types
//!
//! Request and response bodies exchanged with the mileage log service.
//! Field names on the wire are the spreadsheet column headers the service
//! stores (`"Starting Km"`, `"End Km"`, ...), so every field is renamed.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single trip as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Trip date, `YYYY-MM-DD`
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Starting Km", deserialize_with = "deserialize_km")]
    pub starting_km: i64,
    #[serde(rename = "End Km", deserialize_with = "deserialize_km")]
    pub end_km: i64,
    /// Always `end_km - starting_km` for entries written by this client
    #[serde(rename = "Running Km", deserialize_with = "deserialize_km")]
    pub running_km: i64,
    #[serde(rename = "Purpose")]
    pub purpose: String,
}

/// Body of `POST /api/logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLogEntry {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Starting Km")]
    pub starting_km: i64,
    #[serde(rename = "End Km")]
    pub end_km: i64,
    #[serde(rename = "Running Km")]
    pub running_km: i64,
    #[serde(rename = "Purpose")]
    pub purpose: String,
}

impl NewLogEntry {
    /// Build a new entry, deriving the running distance.
    ///
    /// The distance saturates at the `i64` bounds; form validation turns
    /// away readings that far apart before this is reached.
    pub fn new(date: impl Into<String>, starting_km: i64, end_km: i64, purpose: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            starting_km,
            end_km,
            running_km: end_km.saturating_sub(starting_km),
            purpose: purpose.into(),
        }
    }
}

/// Body of `PUT /api/logs/{index}`
///
/// Carries no date: the date of an existing entry cannot be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogUpdate {
    #[serde(rename = "Starting Km")]
    pub starting_km: i64,
    #[serde(rename = "End Km")]
    pub end_km: i64,
    #[serde(rename = "Running Km")]
    pub running_km: i64,
    #[serde(rename = "Purpose")]
    pub purpose: String,
}

impl LogUpdate {
    /// Same distance rule as [`NewLogEntry::new`]
    pub fn new(starting_km: i64, end_km: i64, purpose: impl Into<String>) -> Self {
        Self {
            starting_km,
            end_km,
            running_km: end_km.saturating_sub(starting_km),
            purpose: purpose.into(),
        }
    }
}

/// Body of `GET /api/logs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub monthly_totals: MonthlyTotals,
}

/// Accumulated running kilometres for one month label (e.g. `"2024-05"`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

/// Monthly totals in the order the service sent them
///
/// Sent as a JSON object; deserialized into a list so the key order of the
/// response is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTotals(Vec<MonthlyTotal>);

impl MonthlyTotals {
    pub fn new(totals: Vec<MonthlyTotal>) -> Self {
        Self(totals)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyTotal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for MonthlyTotals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(month, total)| MonthlyTotal { month, total })
                .collect(),
        )
    }
}

impl Serialize for MonthlyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for total in &self.0 {
            map.serialize_entry(&total.month, &total.total)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MonthlyTotals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TotalsVisitor;

        impl<'de> Visitor<'de> for TotalsVisitor {
            type Value = MonthlyTotals;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of month labels to running kilometre totals")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut totals = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((month, total)) = map.next_entry::<String, f64>()? {
                    totals.push(MonthlyTotal { month, total });
                }
                Ok(MonthlyTotals(totals))
            }
        }

        deserializer.deserialize_map(TotalsVisitor)
    }
}

/// Accept integer or float kilometre values.
///
/// The service stores entries in a spreadsheet and may send `1200.0`.
/// Fractions are truncated toward zero.
fn deserialize_km<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|value| value.trunc() as i64))
        .ok_or_else(|| de::Error::custom(format!("invalid kilometre value: {}", number)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_response_wire_names() {
        let body = r#"{
            "logs": [
                {"Date": "2024-05-07", "Starting Km": 1200, "End Km": 1250, "Running Km": 50, "Purpose": "Client visit"},
                {"Date": "2024-05-08", "Starting Km": 1250.0, "End Km": 1262.0, "Running Km": 12.0, "Purpose": "Groceries"}
            ],
            "monthly_totals": {"2024-05": 62}
        }"#;

        let response: LogsResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.logs.len(), 2);
        assert_eq!(response.logs[0].purpose, "Client visit");
        assert_eq!(response.logs[1].starting_km, 1250);
        assert_eq!(response.logs[1].running_km, 12);
        assert_eq!(response.monthly_totals.len(), 1);
    }

    #[test]
    fn test_monthly_totals_keep_response_order() {
        let body = r#"{"logs": [], "monthly_totals": {"2024-05": 40, "2023-12": 12.5, "2024-01": 7}}"#;

        let response: LogsResponse = serde_json::from_str(body).unwrap();
        let months: Vec<&str> = response
            .monthly_totals
            .iter()
            .map(|t| t.month.as_str())
            .collect();

        assert_eq!(months, vec!["2024-05", "2023-12", "2024-01"]);
    }

    #[test]
    fn test_missing_totals_default_to_empty() {
        let response: LogsResponse = serde_json::from_str(r#"{"logs": []}"#).unwrap();
        assert!(response.monthly_totals.is_empty());
    }

    #[test]
    fn test_rejects_non_numeric_km() {
        let body = r#"{"Date": "2024-05-07", "Starting Km": "a lot", "End Km": 1, "Running Km": 1, "Purpose": "x"}"#;
        assert!(serde_json::from_str::<LogEntry>(body).is_err());
    }

    #[test]
    fn test_new_entry_body() {
        let entry = NewLogEntry::new("2024-05-07", 1200, 1250, "Client visit");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["Date"], "2024-05-07");
        assert_eq!(json["Starting Km"], 1200);
        assert_eq!(json["End Km"], 1250);
        assert_eq!(json["Running Km"], 50);
        assert_eq!(json["Purpose"], "Client visit");
    }

    #[test]
    fn test_update_body_has_no_date() {
        let update = LogUpdate::new(100, 130, "Depot");
        let json = serde_json::to_value(&update).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("Date"));
        assert_eq!(object.len(), 4);
        assert_eq!(json["Running Km"], 30);
    }

    #[test]
    fn test_running_km_saturates_instead_of_overflowing() {
        let entry = NewLogEntry::new("2024-05-07", i64::MIN, i64::MAX, "Trip");
        assert_eq!(entry.running_km, i64::MAX);

        let update = LogUpdate::new(i64::MAX, i64::MIN, "Trip");
        assert_eq!(update.running_km, i64::MIN);
    }
}
