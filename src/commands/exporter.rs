// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::{ledger, score};
use crate::models::{Transaction, UserProfile};
use crate::utils::{
    category_names, get_profile, list_transactions, parse_month, parse_year_month,
};
use anyhow::{bail, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::BTreeMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => export_report(conn, sub),
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
    let (year, month_no) = parse_year_month(&month)?;

    let profile = get_profile(conn)?;
    let transactions = list_transactions(conn, Some(&month))?;
    let totals = ledger::aggregate(
        &transactions,
        Some(&ledger::LedgerFilter {
            year,
            month: month_no,
            category_id: None,
        }),
    );
    let savings = score::score(profile.as_ref(), totals.income, totals.net);
    let names = category_names(conn)?;

    match fmt.as_str() {
        "csv" => write_report_csv(
            out,
            &month,
            profile.as_ref(),
            &transactions,
            &totals,
            &savings,
            &names,
        )?,
        "json" => {
            let doc = report_json(&month, profile.as_ref(), &transactions, &totals, &savings, &names);
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported monthly report to {}", out);
    Ok(())
}

fn category_label(names: &BTreeMap<i64, String>, id: Option<i64>) -> String {
    id.and_then(|id| names.get(&id).cloned())
        .unwrap_or_else(|| "(uncategorized)".into())
}

fn write_report_csv(
    out: &str,
    month: &str,
    profile: Option<&UserProfile>,
    transactions: &[Transaction],
    totals: &ledger::LedgerTotals,
    savings: &score::SavingsScore,
    names: &BTreeMap<i64, String>,
) -> Result<()> {
    // Section rows have varying widths.
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(out)?;

    wtr.write_record(["Monthly Financial Report", month])?;

    wtr.write_record(["PROFILE"])?;
    wtr.write_record([
        "Name",
        profile.map(|p| p.name.as_str()).unwrap_or("N/A"),
    ])?;
    wtr.write_record([
        "Monthly Salary".to_string(),
        profile
            .map(|p| format!("{:.2}", p.salary))
            .unwrap_or_else(|| "N/A".into()),
    ])?;
    wtr.write_record([
        "Savings Target".to_string(),
        profile
            .map(|p| format!("{}%", p.savings_percent))
            .unwrap_or_else(|| "N/A".into()),
    ])?;
    wtr.write_record([
        "Buffer Target".to_string(),
        profile
            .map(|p| format!("{}%", p.buffer_percent))
            .unwrap_or_else(|| "N/A".into()),
    ])?;

    wtr.write_record(["SUMMARY"])?;
    wtr.write_record(["Total Income".to_string(), format!("{:.2}", totals.income)])?;
    wtr.write_record([
        "Total Expenses".to_string(),
        format!("{:.2}", totals.expenses),
    ])?;
    wtr.write_record(["Net Amount".to_string(), format!("{:.2}", totals.net)])?;
    wtr.write_record(["Savings Score".to_string(), savings.band.to_string()])?;
    wtr.write_record([
        "Total Transactions".to_string(),
        transactions.len().to_string(),
    ])?;

    wtr.write_record(["ANALYSIS"])?;
    if let Some(t) = ledger::largest_expense(transactions) {
        wtr.write_record(["Maximum Expense".to_string(), format!("{:.2}", -t.amount)])?;
        wtr.write_record([
            "Maximum Expense Category".to_string(),
            category_label(names, t.category_id),
        ])?;
        wtr.write_record(["Maximum Expense Date".to_string(), t.date.to_string()])?;
    }
    if let Some((day, total)) = ledger::most_expensive_day(transactions) {
        wtr.write_record(["Most Expensive Day".to_string(), day.to_string()])?;
        wtr.write_record([
            "Most Expensive Day Amount".to_string(),
            format!("{:.2}", total),
        ])?;
    }

    wtr.write_record(["TRANSACTIONS"])?;
    wtr.write_record(["Date", "Category", "Type", "Amount", "Method", "Notes"])?;
    for t in transactions {
        let kind = if t.amount > Decimal::ZERO {
            "Income"
        } else {
            "Expense"
        };
        wtr.write_record([
            t.date.to_string(),
            category_label(names, t.category_id),
            kind.to_string(),
            format!("{:.2}", t.amount.abs()),
            t.method.clone().unwrap_or_else(|| "N/A".into()),
            t.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn report_json(
    month: &str,
    profile: Option<&UserProfile>,
    transactions: &[Transaction],
    totals: &ledger::LedgerTotals,
    savings: &score::SavingsScore,
    names: &BTreeMap<i64, String>,
) -> serde_json::Value {
    let detail: Vec<serde_json::Value> = transactions
        .iter()
        .map(|t| {
            json!({
                "date": t.date.to_string(),
                "category": category_label(names, t.category_id),
                "type": if t.amount > Decimal::ZERO { "Income" } else { "Expense" },
                "amount": format!("{:.2}", t.amount.abs()),
                "method": t.method,
                "note": t.note,
            })
        })
        .collect();
    json!({
        "month": month,
        "profile": profile,
        "summary": {
            "income": format!("{:.2}", totals.income),
            "expenses": format!("{:.2}", totals.expenses),
            "net": format!("{:.2}", totals.net),
            "savings_band": savings.band.to_string(),
            "savings_ratio_percent": format!("{:.0}", savings.ratio_percent),
            "transactions": transactions.len(),
        },
        "transactions": detail,
    })
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let transactions = list_transactions(conn, None)?;
    let names = category_names(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "category", "amount", "method", "note"])?;
            for t in &transactions {
                wtr.write_record([
                    t.date.to_string(),
                    t.category_id
                        .and_then(|id| names.get(&id).cloned())
                        .unwrap_or_default(),
                    t.amount.to_string(),
                    t.method.clone().unwrap_or_default(),
                    t.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = transactions
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "category": t.category_id.and_then(|id| names.get(&id).cloned()),
                        "amount": t.amount.to_string(),
                        "method": t.method,
                        "note": t.note,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
