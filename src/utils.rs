// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{Frequency, Goal, RecurringObligation, Transaction, UserProfile};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

/// Split a validated YYYY-MM string into its calendar parts.
pub fn parse_year_month(s: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!("Invalid month '{}', expected YYYY-MM", s));
    }
    let year: i32 = parts[0]
        .parse()
        .with_context(|| format!("Invalid year in '{}'", s))?;
    let month: u32 = parts[1]
        .parse()
        .with_context(|| format!("Invalid month in '{}'", s))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow::anyhow!("Invalid month number {}", month));
    }
    Ok((year, month))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if !jsonl_flag {
        return Ok(false);
    }
    // Stream array elements one per line; anything else becomes one line.
    match serde_json::to_value(v)? {
        serde_json::Value::Array(items) => {
            for item in items {
                println!("{}", serde_json::to_string(&item)?);
            }
        }
        other => println!("{}", serde_json::to_string(&other)?),
    }
    Ok(true)
}

pub fn id_for_category(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

pub fn category_names(conn: &Connection) -> Result<BTreeMap<i64, String>> {
    let mut stmt = conn.prepare("SELECT id, name FROM categories")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)))?;
    let mut map = BTreeMap::new();
    for row in rows {
        let (id, name) = row?;
        map.insert(id, name);
    }
    Ok(map)
}

// Profile accessors: the single-row user configuration.

pub fn get_profile(conn: &Connection) -> Result<Option<UserProfile>> {
    let row: Option<(String, String, String, String)> = conn
        .query_row(
            "SELECT name, salary, savings_percent, buffer_percent FROM profile WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let Some((name, salary, savings, buffer)) = row else {
        return Ok(None);
    };
    Ok(Some(UserProfile {
        name,
        salary: salary
            .parse::<Decimal>()
            .with_context(|| format!("Invalid salary '{}' in profile", salary))?,
        savings_percent: savings
            .parse::<Decimal>()
            .with_context(|| format!("Invalid savings percent '{}' in profile", savings))?,
        buffer_percent: buffer
            .parse::<Decimal>()
            .with_context(|| format!("Invalid buffer percent '{}' in profile", buffer))?,
    }))
}

pub fn save_profile(conn: &Connection, profile: &UserProfile) -> Result<()> {
    conn.execute(
        "INSERT INTO profile(id, name, salary, savings_percent, buffer_percent)
         VALUES (1, ?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            name=excluded.name,
            salary=excluded.salary,
            savings_percent=excluded.savings_percent,
            buffer_percent=excluded.buffer_percent",
        params![
            profile.name,
            profile.salary.to_string(),
            profile.savings_percent.to_string(),
            profile.buffer_percent.to_string()
        ],
    )?;
    Ok(())
}

// Snapshot loaders: rows in, plain models out. The core only ever sees the
// models these return.

pub fn list_transactions(conn: &Connection, month: Option<&str>) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, date, category_id, amount, method, note FROM transactions WHERE 1=1",
    );
    if month.is_some() {
        sql.push_str(" AND substr(date,1,7)=?1");
    }
    sql.push_str(" ORDER BY date, id");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = match month {
        Some(m) => stmt.query(params![m])?,
        None => stmt.query([])?,
    };

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let category_id: Option<i64> = r.get(2)?;
        let amount_s: String = r.get(3)?;
        let method: Option<String> = r.get(4)?;
        let note: Option<String> = r.get(5)?;
        out.push(Transaction {
            id,
            date: parse_date(&date_s)
                .with_context(|| format!("Invalid date '{}' in transactions", date_s))?,
            category_id,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?,
            method,
            note,
        });
    }
    Ok(out)
}

pub fn list_recurring(conn: &Connection) -> Result<Vec<RecurringObligation>> {
    let mut stmt =
        conn.prepare("SELECT id, name, category_id, amount, frequency FROM recurring ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let category_id: Option<i64> = r.get(2)?;
        let amount_s: String = r.get(3)?;
        let freq_s: String = r.get(4)?;
        out.push(RecurringObligation {
            id,
            name,
            category_id,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in recurring", amount_s))?,
            frequency: Frequency::from_str(&freq_s)?,
        });
    }
    Ok(out)
}

pub fn list_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt =
        conn.prepare("SELECT id, name, target, current, deadline FROM goals ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let target_s: String = r.get(2)?;
        let current_s: String = r.get(3)?;
        let deadline_s: Option<String> = r.get(4)?;
        out.push(Goal {
            id,
            name,
            target: target_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid target '{}' in goals", target_s))?,
            current: current_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid current '{}' in goals", current_s))?,
            deadline: deadline_s.as_deref().map(parse_date).transpose()?,
        });
    }
    Ok(out)
}
