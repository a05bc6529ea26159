use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use geniki_core::{DomainError, DomainResult};

/// Input format of the export form's date fields.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Inclusive timestamp window of an export run.
///
/// Construction guarantees `start <= end`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl ExportRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "start ({start}) must not be after end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole calendar days: `start_date 00:00:00` through `end_date 23:59:59`.
    pub fn from_dates(start_date: NaiveDate, end_date: NaiveDate) -> DomainResult<Self> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| DomainError::validation("invalid end-of-day time"))?;
        Self::new(
            start_date.and_time(NaiveTime::MIN),
            end_date.and_time(end_of_day),
        )
    }

    /// Parse the raw `start_date` / `end_date` form fields (`YYYY-MM-DD`).
    pub fn parse(start_date: &str, end_date: &str) -> DomainResult<Self> {
        let start = parse_date("start_date", start_date)?;
        let end = parse_date("end_date", end_date)?;
        Self::from_dates(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}

fn parse_date(field: &str, raw: &str) -> DomainResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT)
        .map_err(|e| DomainError::validation(format!("{field} must be YYYY-MM-DD: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn single_day_covers_whole_day() {
        let range = ExportRange::parse("2024-01-05", "2024-01-05").unwrap();
        assert_eq!(range.start(), ts("2024-01-05 00:00:00"));
        assert_eq!(range.end(), ts("2024-01-05 23:59:59"));
        assert!(range.contains(ts("2024-01-05 00:00:00")));
        assert!(range.contains(ts("2024-01-05 23:59:59")));
        assert!(!range.contains(ts("2024-01-06 00:00:00")));
        assert!(!range.contains(ts("2024-01-04 23:59:59")));
    }

    #[test]
    fn start_after_end_is_rejected() {
        let err = ExportRange::parse("2024-02-01", "2024-01-31").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn missing_or_malformed_dates_are_rejected() {
        match ExportRange::parse("", "2024-01-31").unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("start_date is required")),
            other => panic!("expected validation error, got {other:?}"),
        }
        match ExportRange::parse("2024-01-01", "31/01/2024").unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("end_date")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
