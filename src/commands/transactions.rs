// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_category, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let method = sub.get_one::<String>("method").map(|s| s.trim().to_string());
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let category_id = if let Some(ref cat) = category {
        Some(id_for_category(conn, cat)?)
    } else {
        None
    };

    conn.execute(
        "INSERT INTO transactions(date, category_id, amount, method, note)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![date.to_string(), category_id, amount.to_string(), method, note],
    )?;
    let kind = if amount.is_sign_negative() {
        "expense"
    } else {
        "income"
    };
    println!(
        "Recorded {} {} on {}{}",
        kind,
        amount,
        date,
        category.map(|c| format!(" ({})", c)).unwrap_or_default()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.method.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Category", "Amount", "Method", "Note"], rows)
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        println!("No transaction with id {}", id);
    } else {
        println!("Deleted transaction {}", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub method: String,
    pub note: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, c.name, t.amount, t.method, t.note FROM transactions t LEFT JOIN categories c ON t.category_id=c.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let category: Option<String> = r.get(2)?;
        let amount: String = r.get(3)?;
        let method: Option<String> = r.get(4)?;
        let note: Option<String> = r.get(5)?;
        data.push(TransactionRow {
            id,
            date,
            category: category.unwrap_or_default(),
            amount,
            method: method.unwrap_or_default(),
            note: note.unwrap_or_default(),
        });
    }
    Ok(data)
}
