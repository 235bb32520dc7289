use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format used for stored measurement dates and for rendering window bounds.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A string that is not a `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a YYYY-MM-DD date")]
pub struct InvalidDateError {
    pub input: String,
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// The year must be exactly four unsigned ASCII digits; month and day take one
/// or two digits (`2017-1-5` is accepted). Signs, whitespace, short or long
/// years and trailing text are rejected, since the parsed date is rendered
/// back to text and compared lexicographically.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, InvalidDateError> {
    let invalid = || InvalidDateError {
        input: raw.to_string(),
    };

    let mut parts = raw.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let field = |text: &str, min_len: usize, max_len: usize| -> Option<u32> {
        let well_formed = (min_len..=max_len).contains(&text.len())
            && text.bytes().all(|b| b.is_ascii_digit());
        well_formed.then(|| text.parse().ok()).flatten()
    };

    let year = field(year, 4, 4).ok_or_else(invalid)?;
    let month = field(month, 1, 2).ok_or_else(invalid)?;
    let day = field(day, 1, 2).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(invalid)
}

/// First and last measurement dates present in the dataset.
///
/// Computed once at startup and never refreshed; a restart picks up new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRange {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl DatasetRange {
    pub fn new(first_day: NaiveDate, last_day: NaiveDate) -> Self {
        Self {
            first_day,
            last_day,
        }
    }

    /// `last_day` minus twelve calendar months.
    ///
    /// The day of month is clamped, so 2016-02-29 maps to 2015-02-28.
    pub fn year_before_last_day(&self) -> NaiveDate {
        self.last_day
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Padded window covering the final twelve months of data.
    pub fn last_year_window(&self) -> DateWindow {
        DateWindow::padded(self.year_before_last_day(), self.last_day)
    }

    /// Padded window from `start` through the end of the dataset.
    pub fn window_from(&self, start: NaiveDate) -> DateWindow {
        DateWindow::padded(start, self.last_day)
    }
}

/// Inclusive date bounds used to filter measurements.
///
/// Stored dates are `YYYY-MM-DD` text, so filtering compares the rendered
/// bounds lexicographically, which matches calendar order for that format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateWindow {
    /// Window with exactly the given inclusive bounds.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Window widened by one day on each side of `[start, end]`.
    pub fn padded(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            from: start.pred_opt().unwrap_or(start),
            to: end.succ_opt().unwrap_or(end),
        }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Bounds rendered in the stored date format.
    pub fn bounds(&self) -> (String, String) {
        (
            self.from.format(ISO_DATE_FORMAT).to_string(),
            self.to.format(ISO_DATE_FORMAT).to_string(),
        )
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
