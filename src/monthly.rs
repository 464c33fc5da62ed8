// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month totals, expense breakdown by category, and a per-day series, all
//! recomputed from raw transactions. Daily summaries are not consulted.

use crate::dates;
use crate::engine::add;
use crate::errors::{LedgerError, Result};
use crate::models::{Category, CategoryBreakdown, DailyPoint, MonthlySummary, Transaction, TxType};
use crate::store::transactions;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub fn monthly_summary(
    conn: &Connection,
    owner: &str,
    year: i32,
    month: u32,
) -> Result<MonthlySummary> {
    let txs = transactions::list_by_month(conn, owner, year, month)?;
    summarize_month(year, month, &txs)
}

pub fn summarize_month(year: i32, month: u32, txs: &[Transaction]) -> Result<MonthlySummary> {
    let days = dates::days_in_month(year, month)?;
    let mut daily_data: Vec<DailyPoint> = (1..=days)
        .map(|day| DailyPoint {
            day,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();

    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut by_category: BTreeMap<Category, Decimal> = BTreeMap::new();

    for t in txs {
        let point = if t.day.year() == year && t.day.month() == month {
            daily_data.get_mut(t.day.day() as usize - 1)
        } else {
            None
        };
        match t.tx_type {
            TxType::Income => {
                total_income = add(total_income, t.amount, "monthly income")?;
                if let Some(p) = point {
                    p.income = add(p.income, t.amount, "daily income")?;
                }
            }
            TxType::Expense => {
                total_expense = add(total_expense, t.amount, "monthly expense")?;
                if let Some(p) = point {
                    p.expense = add(p.expense, t.amount, "daily expense")?;
                }
                let slot = by_category.entry(t.category).or_insert(Decimal::ZERO);
                *slot = add(*slot, t.amount, "category total")?;
            }
        }
    }

    let net_income = total_income
        .checked_sub(total_expense)
        .ok_or_else(|| LedgerError::Overflow("monthly net income".into()))?;
    Ok(MonthlySummary {
        year,
        month,
        total_income,
        total_expense,
        net_income,
        category_breakdown: breakdown(by_category, total_expense)?,
        daily_data,
    })
}

fn breakdown(
    by_category: BTreeMap<Category, Decimal>,
    total_expense: Decimal,
) -> Result<Vec<CategoryBreakdown>> {
    let mut items = Vec::with_capacity(by_category.len());
    for (category, amount) in by_category {
        let percentage = if total_expense > Decimal::ZERO {
            // share is at most 1, so the product stays in range
            (amount / total_expense)
                .checked_mul(Decimal::ONE_HUNDRED)
                .ok_or_else(|| LedgerError::Overflow("category percentage".into()))?
        } else {
            Decimal::ZERO
        };
        items.push(CategoryBreakdown {
            category,
            amount,
            percentage,
        });
    }
    items.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    Ok(items)
}
