// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use daybook::dates::DayKey;
use daybook::db;
use daybook::errors::LedgerError;
use daybook::models::{Category, NewTransaction, TxType};
use daybook::store::{budgets, profiles, summaries, transactions};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn item(tx_type: &str, category: &str, amount: rust_decimal::Decimal, date: &str) -> NewTransaction {
    NewTransaction {
        tx_type: tx_type.into(),
        category: category.into(),
        amount,
        note: None,
        date: date.into(),
    }
}

#[test]
fn create_many_then_list_by_day_newest_first() {
    let conn = setup();
    let ids = transactions::create_many(
        &conn,
        "u1",
        &[
            item("EXPENSE", "food", dec!(120), "15-06-2567"),
            item("income", "Salary", dec!(1000.50), "15-06-2567"),
            item("EXPENSE", "transport", dec!(40), "16-06-2567"),
        ],
    )
    .unwrap();
    assert_eq!(ids.len(), 3);

    let day = DayKey::from_ymd(2024, 6, 15).unwrap();
    let txs = transactions::list_by_day(&conn, "u1", day).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].id, ids[1]);
    assert_eq!(txs[0].tx_type, TxType::Income);
    assert_eq!(txs[0].category, Category::Salary);
    assert_eq!(txs[0].amount, dec!(1000.50));
    assert!(txs.iter().all(|t| t.day == day));
}

#[test]
fn list_is_scoped_to_owner() {
    let conn = setup();
    transactions::create_many(&conn, "u1", &[item("EXPENSE", "food", dec!(10), "15-06-2567")])
        .unwrap();
    let day = DayKey::from_ymd(2024, 6, 15).unwrap();
    assert!(transactions::list_by_day(&conn, "u2", day).unwrap().is_empty());
}

#[test]
fn invalid_item_rejects_whole_batch() {
    let conn = setup();
    let err = transactions::create_many(
        &conn,
        "u1",
        &[
            item("EXPENSE", "food", dec!(10), "15-06-2567"),
            item("EXPENSE", "food", dec!(0), "15-06-2567"),
            item("EXPENSE", "", dec!(5), "15-06-2567"),
        ],
    )
    .unwrap_err();
    match err {
        LedgerError::Validation(msg) => {
            assert!(msg.contains("item 2"), "{msg}");
            assert!(msg.contains("item 3"), "{msg}");
            assert!(msg.contains("category is required"), "{msg}");
        }
        other => panic!("unexpected {other:?}"),
    }
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn empty_batch_is_a_validation_error() {
    let conn = setup();
    assert!(matches!(
        transactions::create_many(&conn, "u1", &[]),
        Err(LedgerError::Validation(_))
    ));
}

#[test]
fn validate_trims_note_and_date() {
    let mut it = item("expense", "other", dec!(3), " 15-06-2567 ");
    it.note = Some("   ".into());
    let v = transactions::validate(&it).unwrap();
    assert_eq!(v.note, None);
    assert_eq!(v.day, DayKey::from_ymd(2024, 6, 15).unwrap());
    assert!(transactions::validate(&item("refund", "food", dec!(1), "15-06-2567")).is_err());
    assert!(transactions::validate(&item("expense", "pets", dec!(1), "15-06-2567")).is_err());
}

#[test]
fn month_listing_respects_boundaries() {
    let conn = setup();
    transactions::create_many(
        &conn,
        "u1",
        &[
            item("EXPENSE", "food", dec!(1), "31-05-2567"),
            item("EXPENSE", "food", dec!(2), "01-06-2567"),
            item("EXPENSE", "food", dec!(3), "30-06-2567"),
            item("EXPENSE", "food", dec!(4), "01-07-2567"),
        ],
    )
    .unwrap();
    let june = transactions::list_by_month(&conn, "u1", 2024, 6).unwrap();
    let amounts: Vec<_> = june.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(2), dec!(3)]);
}

#[test]
fn delete_one_checks_owner() {
    let conn = setup();
    let ids = transactions::create_many(&conn, "u1", &[item("EXPENSE", "food", dec!(9), "15-06-2567")])
        .unwrap();
    assert!(matches!(
        transactions::delete_one(&conn, "u2", ids[0]),
        Err(LedgerError::NotFound(_))
    ));
    let deleted = transactions::delete_one(&conn, "u1", ids[0]).unwrap();
    assert_eq!(deleted.amount, dec!(9));
    assert!(transactions::find_one(&conn, "u1", ids[0]).unwrap().is_none());
}

#[test]
fn budget_upsert_and_negative_rejected() {
    let conn = setup();
    assert!(budgets::get(&conn, "u1").unwrap().is_none());
    budgets::set(&conn, "u1", 500).unwrap();
    budgets::set(&conn, "u1", 300).unwrap();
    assert_eq!(budgets::get(&conn, "u1").unwrap().unwrap().amount, 300);
    assert!(matches!(
        budgets::set(&conn, "u1", -1),
        Err(LedgerError::Validation(_))
    ));
}

#[test]
fn profile_name_length_and_uniqueness() {
    let conn = setup();
    assert!(profiles::create(&conn, "u1", "   ", None).is_err());
    assert!(profiles::create(&conn, "u1", &"x".repeat(21), None).is_err());
    let p = profiles::create(&conn, "u1", " Somchai ", Some(" s@example.com ")).unwrap();
    assert_eq!(p.user_name, "Somchai");
    assert_eq!(p.email.as_deref(), Some("s@example.com"));
    assert!(profiles::exists(&conn, "u1").unwrap());
    assert!(profiles::create(&conn, "u1", "Again", None).is_err());
}

#[test]
fn summary_upsert_keeps_one_row_per_day() {
    let conn = setup();
    let day = DayKey::from_ymd(2024, 6, 15).unwrap();
    let mut s = daybook::engine::compute_summary("u1", day, dec!(500), &[], dec!(0)).unwrap();
    summaries::upsert(&conn, &s).unwrap();
    s.running_balance = dec!(999);
    summaries::upsert(&conn, &s).unwrap();
    let all = summaries::list_all(&conn, "u1").unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].running_balance, dec!(999));
}

#[test]
fn amount_bounds_and_precision() {
    let too_big = rust_decimal::Decimal::from(transactions::MAX_AMOUNT) + dec!(0.01);
    assert!(matches!(
        transactions::validate(&item("EXPENSE", "food", too_big, "15-06-2567")),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        transactions::validate(&item("EXPENSE", "food", dec!(0.001), "15-06-2567")),
        Err(LedgerError::Validation(_))
    ));
    // trailing zeros are not extra precision
    assert!(transactions::validate(&item("EXPENSE", "food", dec!(1.500), "15-06-2567")).is_ok());
    let max = rust_decimal::Decimal::from(transactions::MAX_AMOUNT);
    assert!(transactions::validate(&item("INCOME", "salary", max, "15-06-2567")).is_ok());
}
