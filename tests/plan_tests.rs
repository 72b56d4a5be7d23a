// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyplan::{cli, commands::plan};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE profile(id INTEGER PRIMARY KEY CHECK(id = 1), name TEXT NOT NULL, salary TEXT NOT NULL, savings_percent TEXT NOT NULL, buffer_percent TEXT NOT NULL);
        CREATE TABLE categories(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE);
        CREATE TABLE transactions(id INTEGER PRIMARY KEY AUTOINCREMENT, date TEXT NOT NULL, category_id INTEGER, amount TEXT NOT NULL, method TEXT, note TEXT);
        CREATE TABLE recurring(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE, category_id INTEGER, amount TEXT NOT NULL, frequency TEXT NOT NULL);
        CREATE TABLE goals(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE, target TEXT NOT NULL, current TEXT NOT NULL DEFAULT '0', deadline TEXT);
    "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO profile(id, name, salary, savings_percent, buffer_percent) VALUES (1,'Asha','5000','15','10')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO goals(name, target, current) VALUES ('Emergency fund','10000','0')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO goals(name, target, current) VALUES ('Laptop','5000','0')",
        [],
    )
    .unwrap();
    conn
}

fn run_plan(conn: &mut Connection, argv: &[&str]) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(argv);
    if let Some(("plan", plan_m)) = matches.subcommand() {
        plan::handle(conn, plan_m).unwrap();
    } else {
        panic!("plan command not parsed");
    }
}

fn goal_current(conn: &Connection, name: &str) -> String {
    let raw: String = conn
        .query_row(
            "SELECT current FROM goals WHERE name=?1",
            [name],
            |r| r.get(0),
        )
        .unwrap();
    format!("{:.2}", raw.parse::<rust_decimal::Decimal>().unwrap())
}

#[test]
fn fund_distributes_salary_savings_share() {
    let mut conn = setup();
    // No recorded income in 2025-08, so the basis is the 5000 salary and
    // the savings pool is 750, split 2:1 by target.
    run_plan(&mut conn, &["moneyplan", "plan", "fund", "--month", "2025-08"]);
    assert_eq!(goal_current(&conn, "Emergency fund"), "500.00");
    assert_eq!(goal_current(&conn, "Laptop"), "250.00");
}

#[test]
fn fund_uses_recorded_month_income_when_present() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO transactions(date, amount) VALUES ('2025-08-05','2000')",
        [],
    )
    .unwrap();
    run_plan(&mut conn, &["moneyplan", "plan", "fund", "--month", "2025-08"]);
    // Pool = 2000 * 15% = 300.
    assert_eq!(goal_current(&conn, "Emergency fund"), "200.00");
    assert_eq!(goal_current(&conn, "Laptop"), "100.00");
}

#[test]
fn fund_dry_run_persists_nothing() {
    let mut conn = setup();
    run_plan(
        &mut conn,
        &["moneyplan", "plan", "fund", "--month", "2025-08", "--dry-run"],
    );
    assert_eq!(goal_current(&conn, "Emergency fund"), "0.00");
    assert_eq!(goal_current(&conn, "Laptop"), "0.00");
}

#[test]
fn fund_with_zero_savings_percent_is_a_no_op() {
    let mut conn = setup();
    conn.execute("UPDATE profile SET savings_percent='0' WHERE id=1", [])
        .unwrap();
    run_plan(&mut conn, &["moneyplan", "plan", "fund", "--month", "2025-08"]);
    assert_eq!(goal_current(&conn, "Emergency fund"), "0.00");
}

#[test]
fn fund_net_of_recurring_shrinks_the_pool() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO recurring(name, amount, frequency) VALUES ('Rent','3000','monthly')",
        [],
    )
    .unwrap();
    run_plan(
        &mut conn,
        &[
            "moneyplan",
            "plan",
            "fund",
            "--month",
            "2025-08",
            "--net-of-recurring",
        ],
    );
    // Available 2000, pool 300.
    assert_eq!(goal_current(&conn, "Emergency fund"), "200.00");
    assert_eq!(goal_current(&conn, "Laptop"), "100.00");
}

#[test]
fn fund_never_pushes_a_goal_past_its_target() {
    let mut conn = setup();
    conn.execute(
        "UPDATE goals SET target='100', current='95' WHERE name='Laptop'",
        [],
    )
    .unwrap();
    run_plan(
        &mut conn,
        &["moneyplan", "plan", "fund", "--month", "2025-08", "--income", "100000"],
    );
    let current: String = goal_current(&conn, "Laptop");
    assert_eq!(current, "100.00");
}

#[test]
fn fund_income_override_wins_over_salary() {
    let mut conn = setup();
    run_plan(
        &mut conn,
        &["moneyplan", "plan", "fund", "--month", "2025-08", "--income", "1000"],
    );
    // Pool = 150.
    assert_eq!(goal_current(&conn, "Emergency fund"), "100.00");
    assert_eq!(goal_current(&conn, "Laptop"), "50.00");
}
