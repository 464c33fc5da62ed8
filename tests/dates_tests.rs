// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use daybook::dates::{self, DayKey};
use daybook::errors::LedgerError;

fn day(y: i32, m: u32, d: u32) -> DayKey {
    DayKey::from_ymd(y, m, d).unwrap()
}

#[test]
fn regional_year_maps_to_universal_day() {
    assert_eq!(dates::encode("15-06-2567").unwrap(), day(2024, 6, 15));
    assert_eq!(dates::encode("01-01-2568").unwrap(), day(2025, 1, 1));
    assert_eq!(day(2024, 6, 15).to_regional_string(), "15-06-2567");
}

#[test]
fn encoded_day_is_stored_at_noon_utc() {
    let key = dates::encode("31-12-2567").unwrap();
    assert_eq!(
        dates::storage_instant(key.noon_utc()),
        "2024-12-31T12:00:00.000Z"
    );
    assert_eq!(key.to_string(), "2024-12-31");
}

#[test]
fn leap_day_only_in_leap_years() {
    assert_eq!(dates::encode("29-02-2567").unwrap(), day(2024, 2, 29));
    assert!(matches!(
        dates::encode("29-02-2566"),
        Err(LedgerError::InvalidDateFormat(_))
    ));
}

#[test]
fn impossible_dates_are_rejected_not_rolled_over() {
    // passes the shape check but is not a real date
    assert!(dates::is_valid_day_string("31-02-2567"));
    assert!(dates::encode("31-02-2567").is_err());
}

#[test]
fn malformed_strings_fail_to_encode() {
    for s in ["", "2567-06-15", "15/06/2567", "15-06", "aa-bb-cccc", "15-06-2567-1"] {
        assert!(
            matches!(dates::encode(s), Err(LedgerError::InvalidDateFormat(_))),
            "{s}"
        );
    }
}

#[test]
fn wire_gate_checks_shape_and_ranges() {
    assert!(dates::is_valid_day_string("01-01-2500"));
    assert!(dates::is_valid_day_string("31-12-3000"));
    assert!(!dates::is_valid_day_string("1-1-2567"));
    assert!(!dates::is_valid_day_string("00-06-2567"));
    assert!(!dates::is_valid_day_string("15-13-2567"));
    assert!(!dates::is_valid_day_string("15-06-2499"));
    assert!(!dates::is_valid_day_string("15-06-3001"));
    assert!(!dates::is_valid_day_string(" 15-06-2567"));
}

#[test]
fn day_range_covers_whole_day() {
    let (start, end) = dates::day_range(day(2024, 6, 15));
    assert_eq!(dates::storage_instant(start), "2024-06-15T00:00:00.000Z");
    assert_eq!(dates::storage_instant(end), "2024-06-15T23:59:59.999Z");
}

#[test]
fn previous_and_next_cross_boundaries() {
    assert_eq!(day(2024, 3, 1).previous(), Some(day(2024, 2, 29)));
    assert_eq!(day(2024, 1, 1).previous(), Some(day(2023, 12, 31)));
    assert_eq!(day(2023, 12, 31).next(), Some(day(2024, 1, 1)));
}

#[test]
fn month_lengths() {
    assert_eq!(dates::days_in_month(2024, 2).unwrap(), 29);
    assert_eq!(dates::days_in_month(2023, 2).unwrap(), 28);
    assert_eq!(dates::days_in_month(2024, 4).unwrap(), 30);
    assert!(dates::days_in_month(2024, 13).is_err());
    let (first, last) = dates::month_bounds(2024, 6).unwrap();
    assert_eq!((first, last), (day(2024, 6, 1), day(2024, 6, 30)));
}

#[test]
fn storage_strings_parse_back() {
    let key: DayKey = "2024-06-15".parse().unwrap();
    assert_eq!(key, day(2024, 6, 15));
    assert!("15-06-2567".parse::<DayKey>().is_err());
    assert_eq!(
        DayKey::from_instant_str("2024-06-15T12:00:00.000Z").unwrap(),
        key
    );
}
