// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Day strings as the user types them (`DD-MM-YYYY`, regional year) and the
//! canonical UTC calendar day used as a storage key.

use crate::errors::{LedgerError, Result};
use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regional display years run this far ahead of the universal calendar.
pub const REGIONAL_YEAR_OFFSET: i32 = 543;

pub const MIN_REGIONAL_YEAR: i32 = 2500;
pub const MAX_REGIONAL_YEAR: i32 = 3000;

const STORAGE_INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

static DAY_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("static day regex"));

/// A calendar day in the universal (UTC) calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DayKey)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Midday UTC on this day. Transactions are stamped with this instant so
    /// that no caller time zone can push them across a day boundary.
    pub fn noon_utc(&self) -> DateTime<Utc> {
        self.start_of_day() + Duration::hours(12)
    }

    fn start_of_day(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// The day before, across month and year boundaries.
    pub fn previous(&self) -> Option<DayKey> {
        self.0.checked_sub_days(Days::new(1)).map(DayKey)
    }

    pub fn next(&self) -> Option<DayKey> {
        self.0.checked_add_days(Days::new(1)).map(DayKey)
    }

    /// Parses the `YYYY-MM-DD` form used in the summaries table.
    pub fn parse_storage(s: &str) -> Result<DayKey> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DayKey)
            .map_err(|_| LedgerError::InvalidDateFormat(format!("'{}', expected YYYY-MM-DD", s)))
    }

    /// Recovers the day from a stored transaction instant.
    pub fn from_instant_str(s: &str) -> Result<DayKey> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| DayKey(dt.with_timezone(&Utc).date_naive()))
            .map_err(|_| LedgerError::InvalidDateFormat(format!("'{}' is not an instant", s)))
    }

    /// `DD-MM-YYYY` with the regional year, the inverse of [`encode`].
    pub fn to_regional_string(&self) -> String {
        format!(
            "{:02}-{:02}-{:04}",
            self.0.day(),
            self.0.month(),
            self.0.year() + REGIONAL_YEAR_OFFSET
        )
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        DayKey::parse_storage(s)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(d: NaiveDate) -> Self {
        DayKey(d)
    }
}

/// Converts a regional `DD-MM-YYYY` string to its canonical day.
pub fn encode(s: &str) -> Result<DayKey> {
    Ok(DayKey(parse_regional(s)?.date_naive()))
}

fn parse_regional(s: &str) -> Result<DateTime<Utc>> {
    let bad = || LedgerError::InvalidDateFormat(format!("'{}', expected DD-MM-YYYY", s));
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(bad());
    }
    let day: u32 = parts[0].parse().map_err(|_| bad())?;
    let month: u32 = parts[1].parse().map_err(|_| bad())?;
    let regional_year: i32 = parts[2].parse().map_err(|_| bad())?;
    let year = regional_year - REGIONAL_YEAR_OFFSET;
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .ok_or_else(bad)
}

/// Full UTC window of a day: `00:00:00.000` through `23:59:59.999`.
pub fn day_range(key: DayKey) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = key.start_of_day();
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

/// Wire-format gate for day strings arriving from the outside. Failing this
/// means "reject the request", not "raise an error".
pub fn is_valid_day_string(s: &str) -> bool {
    if !DAY_STRING.is_match(s) {
        return false;
    }
    let parts: Vec<i32> = s.split('-').filter_map(|p| p.parse().ok()).collect();
    let [day, month, year] = parts.as_slice() else {
        return false;
    };
    (1..=12).contains(month)
        && (1..=31).contains(day)
        && (MIN_REGIONAL_YEAR..=MAX_REGIONAL_YEAR).contains(year)
}

/// Fixed-width rendering used for stored instants. Lexicographic order of
/// these strings matches chronological order.
pub fn storage_instant(dt: DateTime<Utc>) -> String {
    dt.format(STORAGE_INSTANT_FORMAT).to_string()
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => {
            return Err(LedgerError::Validation(format!(
                "Invalid month number {}",
                month
            )));
        }
    };
    Ok(days)
}

/// First and last day of a month, both inclusive.
pub fn month_bounds(year: i32, month: u32) -> Result<(DayKey, DayKey)> {
    let last = days_in_month(year, month)?;
    let invalid = || LedgerError::Validation(format!("Invalid month {}-{:02}", year, month));
    let first = DayKey::from_ymd(year, month, 1).ok_or_else(invalid)?;
    let last = DayKey::from_ymd(year, month, last).ok_or_else(invalid)?;
    Ok((first, last))
}
