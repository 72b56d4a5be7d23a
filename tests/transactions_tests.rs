// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyplan::{cli, commands::transactions, utils};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE categories(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE);
        CREATE TABLE transactions(id INTEGER PRIMARY KEY AUTOINCREMENT, date TEXT NOT NULL, category_id INTEGER, amount TEXT NOT NULL, method TEXT, note TEXT);
    "#,
    )
    .unwrap();
    conn.execute("INSERT INTO categories(name) VALUES('Groceries')", [])
        .unwrap();
    conn
}

fn run_tx(conn: &Connection, argv: &[&str]) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(conn, tx_m).unwrap();
    } else {
        panic!("tx command not parsed");
    }
}

#[test]
fn add_records_a_categorized_expense_and_trims_inputs() {
    let conn = setup();
    run_tx(
        &conn,
        &[
            "moneyplan",
            "tx",
            "add",
            "--date",
            " 2025-08-10 ",
            "--amount",
            " -42.50 ",
            "--category",
            " Groceries ",
            "--method",
            "card",
        ],
    );

    let (date, amount, cat_id): (String, String, Option<i64>) = conn
        .query_row(
            "SELECT date, amount, category_id FROM transactions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(date, "2025-08-10");
    assert_eq!(amount, "-42.50");
    assert!(cat_id.is_some());
}

#[test]
fn add_rejects_unknown_category() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "moneyplan",
        "tx",
        "add",
        "--date",
        "2025-08-10",
        "--amount",
        "-5",
        "--category",
        "Nope",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        assert!(transactions::handle(&conn, tx_m).is_err());
    } else {
        panic!("tx command not parsed");
    }
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn query_rows_filters_by_month() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date, amount) VALUES ('2025-07-31','-10'),('2025-08-01','-20')",
        [],
    )
    .unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["moneyplan", "tx", "list", "--month", "2025-08"]);
    let list_m = match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => list_m.clone(),
            _ => panic!("list not parsed"),
        },
        _ => panic!("tx not parsed"),
    };
    let rows = transactions::query_rows(&conn, &list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2025-08-01");
}

#[test]
fn rm_deletes_by_id() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(id, date, amount) VALUES (7,'2025-08-01','-20')",
        [],
    )
    .unwrap();
    run_tx(&conn, &["moneyplan", "tx", "rm", "--id", "7"]);
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn list_transactions_maps_rows_to_models() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date, category_id, amount, method, note)
         VALUES ('2025-08-01', 1, '-12.34', 'cash', 'weekly run')",
        params![],
    )
    .unwrap();

    let txs = utils::list_transactions(&conn, Some("2025-08")).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, "-12.34".parse::<Decimal>().unwrap());
    assert_eq!(txs[0].category_id, Some(1));
    assert_eq!(txs[0].method.as_deref(), Some("cash"));

    assert!(utils::list_transactions(&conn, Some("2025-09"))
        .unwrap()
        .is_empty());
}
