// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::{allocation, funding, ledger, score};
use crate::models::Allocation;
use crate::utils::{
    get_profile, list_goals, list_recurring, list_transactions, maybe_print_json, parse_decimal,
    parse_month, parse_year_month, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("fund", sub)) => fund(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Income basis for the plan: an explicit override wins, then the month's
/// recorded income, then the profile salary (inside the engine).
fn actual_income(conn: &Connection, sub: &clap::ArgMatches) -> Result<Option<Decimal>> {
    if let Some(raw) = sub.get_one::<String>("income") {
        return Ok(Some(parse_decimal(raw.trim())?));
    }
    let Some(month) = sub.get_one::<String>("month") else {
        return Ok(None);
    };
    let month = parse_month(month.trim())?;
    let (year, month_no) = parse_year_month(&month)?;
    let transactions = list_transactions(conn, Some(&month))?;
    let totals = ledger::aggregate(
        &transactions,
        Some(&ledger::LedgerFilter {
            year,
            month: month_no,
            category_id: None,
        }),
    );
    if totals.income > Decimal::ZERO {
        Ok(Some(totals.income))
    } else {
        Ok(None)
    }
}

fn derive_allocation(conn: &Connection, sub: &clap::ArgMatches) -> Result<Allocation> {
    let profile = get_profile(conn)?;
    let income = actual_income(conn, sub)?;
    if sub.get_flag("net-of-recurring") {
        let recurring = list_recurring(conn)?;
        Ok(allocation::allocate_net_of_recurring(
            profile.as_ref(),
            income,
            &recurring,
        ))
    } else {
        Ok(allocation::allocate_gross(profile.as_ref(), income))
    }
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let alloc = derive_allocation(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &alloc)? {
        return Ok(());
    }

    let rows = vec![
        vec!["Essentials".to_string(), format!("{:.2}", alloc.essentials)],
        vec!["Savings".to_string(), format!("{:.2}", alloc.savings)],
        vec![
            "Discretionary".to_string(),
            format!("{:.2}", alloc.discretionary),
        ],
        vec!["Buffer".to_string(), format!("{:.2}", alloc.buffer)],
    ];
    println!("{}", pretty_table(&["Share", "Amount"], rows));

    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month.trim())?;
        let (year, month_no) = parse_year_month(&month)?;
        let transactions = list_transactions(conn, Some(&month))?;
        let totals = ledger::aggregate(
            &transactions,
            Some(&ledger::LedgerFilter {
                year,
                month: month_no,
                category_id: None,
            }),
        );
        let profile = get_profile(conn)?;
        let s = score::score(profile.as_ref(), totals.income, totals.net);
        println!(
            "Savings score for {}: {} ({:.0}% of target)",
            month, s.band, s.ratio_percent
        );
    }
    Ok(())
}

fn fund(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let dry_run = sub.get_flag("dry-run");
    let alloc = derive_allocation(conn, sub)?;
    let pool = alloc.savings;

    let goals = list_goals(conn)?;
    if goals.is_empty() {
        println!("No goals to fund.");
        return Ok(());
    }
    let updated = funding::distribute(pool, &goals);

    let mut rows = Vec::new();
    let mut changed = Vec::new();
    for (before, after) in goals.iter().zip(updated.iter()) {
        if after.current != before.current {
            rows.push(vec![
                after.name.clone(),
                format!("{:.2}", before.current),
                format!("{:.2}", after.current),
                format!("{:.2}", after.current - before.current),
                format!("{:.2}", after.target),
            ]);
            changed.push(after);
        }
    }

    if changed.is_empty() {
        println!("Savings pool {:.2}: nothing to distribute.", pool);
        return Ok(());
    }

    if !dry_run {
        // The whole batch lands in one transaction so a concurrent goal
        // edit never sees a half-applied distribution.
        let tx = conn.transaction()?;
        for goal in &changed {
            tx.execute(
                "UPDATE goals SET current=?1 WHERE id=?2",
                params![goal.current.to_string(), goal.id],
            )?;
        }
        tx.commit()?;
    }

    println!(
        "{}",
        pretty_table(&["Goal", "Before", "After", "Added", "Target"], rows)
    );
    if dry_run {
        println!("Dry run: savings pool {:.2} not persisted.", pool);
    } else {
        println!("Distributed savings pool {:.2} across {} goal(s).", pool, changed.len());
    }
    Ok(())
}
