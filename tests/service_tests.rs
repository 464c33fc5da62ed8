// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use daybook::context::RequestContext;
use daybook::dates::DayKey;
use daybook::db;
use daybook::errors::LedgerError;
use daybook::identity::{IdentityProvider, LocalIdentity};
use daybook::models::{DailyStatus, NewTransaction};
use daybook::service;
use daybook::store::{budgets, profiles};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> (Connection, RequestContext) {
    let conn = db::open_in_memory().unwrap();
    profiles::create(&conn, "u1", "Somchai", None).unwrap();
    budgets::set(&conn, "u1", 500).unwrap();
    let ctx = RequestContext::load(&conn, &LocalIdentity::new(Some("u1"), None)).unwrap();
    (conn, ctx)
}

fn expense(amount: rust_decimal::Decimal, date: &str) -> NewTransaction {
    NewTransaction {
        tx_type: "EXPENSE".into(),
        category: "food".into(),
        amount,
        note: Some("lunch".into()),
        date: date.into(),
    }
}

#[test]
fn context_requires_an_owner() {
    let conn = db::open_in_memory().unwrap();
    let err = RequestContext::load(&conn, &LocalIdentity::anonymous()).unwrap_err();
    assert!(matches!(err, LedgerError::Unauthenticated));
    assert!(err.needs_redirect());
}

#[test]
fn identity_prefers_explicit_user() {
    let id = LocalIdentity::new(Some(" alice "), Some("bob"));
    assert_eq!(id.current_owner_id().as_deref(), Some("alice"));
    let id = LocalIdentity::new(Some(""), Some("bob"));
    assert_eq!(id.current_owner_id().as_deref(), Some("bob"));
}

#[test]
fn mutations_require_onboarding() {
    let mut conn = db::open_in_memory().unwrap();
    let identity = LocalIdentity::new(Some("u1"), None);
    let ctx = RequestContext::load(&conn, &identity).unwrap();
    assert!(!ctx.onboarded);
    let err = service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(1), "15-06-2567")])
        .unwrap_err();
    assert!(matches!(err, LedgerError::OnboardingRequired(_)));
    assert!(service::set_budget(&conn, &ctx, 100).is_err());

    service::create_profile(&conn, &identity, "Somchai", None).unwrap();
    let ctx = RequestContext::load(&conn, &identity).unwrap();
    assert!(ctx.onboarded);
    assert_eq!(ctx.profile.as_ref().map(|p| p.user_name.as_str()), Some("Somchai"));
}

#[test]
fn bulk_save_spanning_days_recalculates_each() {
    let (mut conn, ctx) = setup();
    let out = service::save_bulk_transactions(
        &mut conn,
        &ctx,
        &[
            expense(dec!(100), "16-06-2567"),
            expense(dec!(50), "15-06-2567"),
        ],
    )
    .unwrap();
    assert_eq!(out.ids.len(), 2);
    let days: Vec<_> = out.summaries.iter().map(|s| s.day.to_string()).collect();
    assert_eq!(days, vec!["2024-06-15", "2024-06-16"]);
    assert_eq!(out.summaries[1].running_balance, dec!(850));
}

#[test]
fn bulk_save_is_all_or_nothing() {
    let (mut conn, ctx) = setup();
    let err = service::save_bulk_transactions(
        &mut conn,
        &ctx,
        &[expense(dec!(10), "15-06-2567"), expense(dec!(-5), "15-06-2567")],
    )
    .unwrap_err();
    assert!(err.is_user_facing());
    let day = DayKey::from_ymd(2024, 6, 15).unwrap();
    assert!(service::fetch_day_transactions(&conn, "u1", day).is_empty());
    assert!(service::fetch_daily_summary(&conn, "u1", day).is_none());
}

#[test]
fn delete_recalculates_the_deleted_day() {
    let (mut conn, ctx) = setup();
    let out = service::save_bulk_transactions(
        &mut conn,
        &ctx,
        &[expense(dec!(400), "15-06-2567"), expense(dec!(200), "15-06-2567")],
    )
    .unwrap();
    assert_eq!(out.summaries[0].status, DailyStatus::OverBudget);

    let del = service::delete_transaction(&mut conn, &ctx, out.ids[1]).unwrap();
    assert_eq!(del.deleted.amount, dec!(200));
    assert_eq!(del.summary.total_expense, dec!(400));
    assert_eq!(del.summary.status, DailyStatus::UnderBudget);
}

#[test]
fn deleting_someone_elses_transaction_is_not_found() {
    let (mut conn, ctx) = setup();
    let out = service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(10), "15-06-2567")])
        .unwrap();
    profiles::create(&conn, "u2", "Other", None).unwrap();
    let other = RequestContext::load(&conn, &LocalIdentity::new(Some("u2"), None)).unwrap();
    assert!(matches!(
        service::delete_transaction(&mut conn, &other, out.ids[0]),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(
        service::delete_transaction(&mut conn, &ctx, 9999),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn day_view_carries_previous_balance_for_empty_day() {
    let (mut conn, ctx) = setup();
    service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(100), "15-06-2567")]).unwrap();
    let view = service::day_view(&conn, &ctx, DayKey::from_ymd(2024, 6, 16).unwrap());
    assert!(view.transactions.is_empty());
    assert!(view.summary.is_none());
    assert_eq!(view.running_balance, dec!(400));

    let view = service::day_view(&conn, &ctx, DayKey::from_ymd(2024, 6, 15).unwrap());
    assert_eq!(view.total_expense, dec!(100));
    assert_eq!(view.transactions[0].note.as_deref(), Some("lunch"));
}

#[test]
fn calendar_lists_only_summarized_days_in_order() {
    let (mut conn, ctx) = setup();
    service::save_bulk_transactions(
        &mut conn,
        &ctx,
        &[
            expense(dec!(900), "20-06-2567"),
            expense(dec!(100), "02-06-2567"),
            expense(dec!(100), "01-07-2567"),
        ],
    )
    .unwrap();
    let cal = service::fetch_calendar(&conn, "u1", 2024, 6);
    let got: Vec<_> = cal.iter().map(|c| (c.day.day(), c.status)).collect();
    assert_eq!(
        got,
        vec![(2, DailyStatus::UnderBudget), (20, DailyStatus::OverBudget)]
    );
}

#[test]
fn reads_degrade_to_empty_on_store_failure() {
    let (mut conn, ctx) = setup();
    service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(10), "15-06-2567")]).unwrap();
    conn.execute_batch("DROP TABLE transactions; DROP TABLE daily_summaries; DROP TABLE budgets;")
        .unwrap();
    let day = DayKey::from_ymd(2024, 6, 15).unwrap();
    assert!(service::fetch_day_transactions(&conn, "u1", day).is_empty());
    assert!(service::fetch_daily_summary(&conn, "u1", day).is_none());
    assert!(service::fetch_budget(&conn, "u1").is_none());
    assert!(service::fetch_calendar(&conn, "u1", 2024, 6).is_empty());
    assert_eq!(service::fetch_previous_running_balance(&conn, "u1", day), dec!(0));
    let m = service::fetch_monthly_summary(&conn, "u1", 2024, 6);
    assert_eq!(m.total_expense, dec!(0));
    assert!(m.daily_data.is_empty());
}

#[test]
fn mutations_propagate_store_failures() {
    let (mut conn, ctx) = setup();
    conn.execute_batch("DROP TABLE daily_summaries;").unwrap();
    let err = service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(10), "15-06-2567")])
        .unwrap_err();
    assert!(matches!(err, LedgerError::Store(_)));
    // the insert was rolled back with the failed recalculation
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}
