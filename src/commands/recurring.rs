// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use crate::models::Frequency;
use crate::utils::{
    id_for_category, list_recurring, maybe_print_json, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            conn.execute("DELETE FROM recurring WHERE name=?1", params![name])?;
            println!("Removed recurring obligation '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let frequency = Frequency::from_str(sub.get_one::<String>("frequency").unwrap())?;
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let category_id = if let Some(ref cat) = category {
        Some(id_for_category(conn, cat)?)
    } else {
        None
    };

    conn.execute(
        "INSERT INTO recurring(name, category_id, amount, frequency) VALUES (?1, ?2, ?3, ?4)",
        params![name, category_id, amount.to_string(), frequency.as_str()],
    )?;
    println!("Added recurring '{}': {} {}", name, amount, frequency);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let items = list_recurring(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &items)? {
        return Ok(());
    }

    let committed: Decimal = items.iter().map(|r| r.amount.max(Decimal::ZERO)).sum();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format!("{:.2}", r.amount),
                r.frequency.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Name", "Amount", "Frequency"], rows));
    println!("Committed total: {:.2}", committed);
    Ok(())
}
