//! Conversion history entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A past successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in milliseconds since the Unix epoch.
    pub id: i64,
    /// Raw input as typed.
    pub input: String,
    /// Formatted result as displayed.
    pub result: String,
    /// Calendar date (UTC) of the conversion.
    pub date: NaiveDate,
    /// Direction of the conversion.
    pub direction: Direction,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(input: impl Into<String>, result: impl Into<String>, direction: Direction) -> Self {
        Self::at(Utc::now(), input, result, direction)
    }

    /// Creates an entry stamped with `now`.
    pub fn at(
        now: DateTime<Utc>,
        input: impl Into<String>,
        result: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            id: now.timestamp_millis(),
            input: input.into(),
            result: result.into(),
            date: now.date_naive(),
            direction,
        }
    }

    /// Text used when sharing this result.
    pub fn share_text(&self) -> String {
        format!("Converted value: {}", self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_stamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 0).unwrap();
        let entry = HistoryEntry::at(now, "50L", "60.00K", Direction::InrToUsd);
        assert_eq!(entry.id, now.timestamp_millis());
        assert_eq!(entry.date.to_string(), "2024-03-15");
    }

    #[test]
    fn test_share_text() {
        let entry = HistoryEntry::new("1Cr", "120.00K", Direction::InrToUsd);
        assert_eq!(entry.share_text(), "Converted value: 120.00K");
    }
}
