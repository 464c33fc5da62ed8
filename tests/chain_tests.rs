// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use daybook::chain;
use daybook::config;
use daybook::context::RequestContext;
use daybook::dates::DayKey;
use daybook::db;
use daybook::identity::LocalIdentity;
use daybook::models::NewTransaction;
use daybook::service;
use daybook::store::{budgets, profiles, summaries};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn day(d: u32) -> DayKey {
    DayKey::from_ymd(2024, 6, d).unwrap()
}

fn setup() -> (Connection, RequestContext) {
    let conn = db::open_in_memory().unwrap();
    profiles::create(&conn, "u1", "Somchai", None).unwrap();
    budgets::set(&conn, "u1", 500).unwrap();
    let ctx = context(&conn);
    (conn, ctx)
}

fn context(conn: &Connection) -> RequestContext {
    RequestContext::load(conn, &LocalIdentity::new(Some("u1"), None)).unwrap()
}

fn expense(amount: rust_decimal::Decimal, date: &str) -> NewTransaction {
    NewTransaction {
        tx_type: "EXPENSE".into(),
        category: "food".into(),
        amount,
        note: None,
        date: date.into(),
    }
}

fn seed_three_days(conn: &mut Connection, ctx: &RequestContext) {
    for date in ["15-06-2567", "16-06-2567", "17-06-2567"] {
        service::save_bulk_transactions(conn, ctx, &[expense(dec!(100), date)]).unwrap();
    }
}

#[test]
fn previous_balance_defaults_to_zero() {
    let (conn, _) = setup();
    assert_eq!(chain::previous_balance(&conn, "u1", day(15)).unwrap(), dec!(0));
}

#[test]
fn editing_a_past_day_leaves_later_days_stale() {
    let (mut conn, ctx) = setup();
    seed_three_days(&mut conn, &ctx);
    assert!(chain::find_stale(&conn, "u1").unwrap().is_empty());

    service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(50), "15-06-2567")]).unwrap();

    let d16 = summaries::find(&conn, "u1", day(16)).unwrap().unwrap();
    assert_eq!(d16.running_balance, dec!(800));
    let stale = chain::find_stale(&conn, "u1").unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].day, day(16));
}

#[test]
fn rebuild_repairs_the_chain() {
    let (mut conn, ctx) = setup();
    seed_three_days(&mut conn, &ctx);
    service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(50), "15-06-2567")]).unwrap();

    let rebuilt = service::rebuild_from(&mut conn, &ctx, day(15)).unwrap();
    let days: Vec<_> = rebuilt.iter().map(|s| s.day).collect();
    assert_eq!(days, vec![day(15), day(16), day(17)]);
    assert_eq!(rebuilt[2].running_balance, dec!(1150));
    assert!(chain::find_stale(&conn, "u1").unwrap().is_empty());
}

#[test]
fn cascade_keeps_each_days_budget_snapshot() {
    let (mut conn, ctx) = setup();
    seed_three_days(&mut conn, &ctx);
    budgets::set(&conn, "u1", 1000).unwrap();
    let out = chain::cascade_forward(&conn, "u1", day(15)).unwrap();
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|s| s.budget_at_that_time == dec!(500)));
}

#[test]
fn cascade_setting_updates_later_days_on_save_and_delete() {
    let (mut conn, _) = setup();
    config::set_setting(&conn, config::CASCADE_RECALC, "true").unwrap();
    let ctx = context(&conn);
    seed_three_days(&mut conn, &ctx);

    let out = service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(50), "15-06-2567")])
        .unwrap();
    assert_eq!(out.cascaded, 2);
    assert!(chain::find_stale(&conn, "u1").unwrap().is_empty());

    let id = out.ids[0];
    let del = service::delete_transaction(&mut conn, &ctx, id).unwrap();
    assert_eq!(del.cascaded, 2);
    let d17 = summaries::find(&conn, "u1", day(17)).unwrap().unwrap();
    assert_eq!(d17.running_balance, dec!(1200));
}

#[test]
fn stale_totals_are_reported() {
    let (mut conn, ctx) = setup();
    service::save_bulk_transactions(&mut conn, &ctx, &[expense(dec!(100), "15-06-2567")]).unwrap();
    conn.execute("UPDATE transactions SET amount='130'", []).unwrap();
    let stale = chain::find_stale(&conn, "u1").unwrap();
    assert_eq!(stale.len(), 1);
    assert!(stale[0].issue.contains("totals"));
}
