use chrono::{Days, NaiveDate};

use crate::error::{GhaTimeError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_WINDOW_DAYS: u64 = 7;

/// Inclusive window of run creation dates, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Build a range from optional `YYYY-MM-DD` strings. A missing start
    /// defaults to a week before `today`, a missing end to `today`.
    pub fn resolve(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> Result<Self> {
        let from = match from {
            Some(value) => parse_date(value, "start")?,
            None => today
                .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS))
                .unwrap_or(NaiveDate::MIN),
        };

        let to = match to {
            Some(value) => parse_date(value, "end")?,
            None => today,
        };

        if from > to {
            return Err(GhaTimeError::DateRange(
                "the start date must be before the end date".to_string(),
            ));
        }

        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Value of the `created` query parameter, e.g. `2024-01-01..2024-01-07`.
    pub fn query_filter(&self) -> String {
        format!(
            "{}..{}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }
}

fn parse_date(value: &str, which: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        GhaTimeError::DateRange(format!(
            "invalid {which} date format: please use YYYY-MM-DD"
        ))
    })
}
