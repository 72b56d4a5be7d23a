// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::funding::{apply_contribution, clamp_progress};
use crate::utils::{list_goals, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            conn.execute("DELETE FROM goals WHERE name=?1", params![name])?;
            println!("Removed goal '{}'", name);
        }
        Some(("contribute", sub)) => contribute(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap().trim())?;
    let current = match sub.get_one::<String>("current") {
        Some(s) => parse_decimal(s.trim())?,
        None => Decimal::ZERO,
    };
    let deadline = sub
        .get_one::<String>("deadline")
        .map(|s| parse_date(s.trim()))
        .transpose()?;

    // Progress is clamped into [0, target] on every write.
    let current = clamp_progress(current, target);
    conn.execute(
        "INSERT INTO goals(name, target, current, deadline) VALUES (?1, ?2, ?3, ?4)",
        params![
            name,
            target.to_string(),
            current.to_string(),
            deadline.map(|d| d.to_string())
        ],
    )?;
    println!("Added goal '{}' ({:.2} of {:.2})", name, current, target);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let goals = list_goals(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &goals)? {
        return Ok(());
    }

    let rows: Vec<Vec<String>> = goals
        .iter()
        .map(|g| {
            let percent = if g.target > Decimal::ZERO {
                (g.current / g.target * Decimal::ONE_HUNDRED).round_dp(0)
            } else {
                Decimal::ZERO
            };
            vec![
                g.name.clone(),
                format!("{:.2}", g.current),
                format!("{:.2}", g.target),
                format!("{}%", percent),
                g.deadline.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Goal", "Current", "Target", "Progress", "Deadline"], rows)
    );
    Ok(())
}

fn contribute(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;

    let goal = list_goals(conn)?
        .into_iter()
        .find(|g| g.name == name)
        .ok_or_else(|| anyhow!("Goal '{}' not found", name))?;
    let updated = apply_contribution(&goal, amount);
    conn.execute(
        "UPDATE goals SET current=?1 WHERE id=?2",
        params![updated.current.to_string(), updated.id],
    )?;
    println!(
        "Goal '{}': {:.2} -> {:.2} (target {:.2})",
        name, goal.current, updated.current, updated.target
    );
    Ok(())
}
