// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::dates;
use crate::errors::Result;
use crate::models::CalendarDay;
use crate::store::summaries;
use rusqlite::Connection;

/// Budget status of every summarized day in a month, for colouring calendar
/// cells. Days without a summary are simply absent.
pub fn for_month(conn: &Connection, owner: &str, year: i32, month: u32) -> Result<Vec<CalendarDay>> {
    let (first, last) = dates::month_bounds(year, month)?;
    summaries::statuses_between(conn, owner, first, last)
}
