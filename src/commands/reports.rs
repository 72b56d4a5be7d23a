// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::{ledger, score};
use crate::utils::{
    category_names, get_profile, list_transactions, maybe_print_json, parse_month,
    parse_year_month, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct CategorySpend {
    category: String,
    spent: String,
}

#[derive(Serialize)]
struct MonthReport {
    month: String,
    income: String,
    expenses: String,
    net: String,
    savings_band: String,
    savings_ratio_percent: String,
    transactions: usize,
    by_category: Vec<CategorySpend>,
    largest_expense: Option<String>,
    most_expensive_day: Option<String>,
}

fn month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = parse_month(sub.get_one::<String>("month").unwrap().trim())?;
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
    let savings = score::score(profile.as_ref(), totals.income, totals.net);
    let names = category_names(conn)?;

    let mut by_category: Vec<CategorySpend> = totals
        .by_category
        .iter()
        .map(|(id, spent)| CategorySpend {
            category: names
                .get(id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", id)),
            spent: format!("{:.2}", spent),
        })
        .collect();
    by_category.sort_by(|a, b| a.category.cmp(&b.category));

    let largest = ledger::largest_expense(&transactions).map(|t| {
        let cat = t
            .category_id
            .and_then(|id| names.get(&id).cloned())
            .unwrap_or_else(|| "(uncategorized)".into());
        format!("{:.2} on {} ({})", -t.amount, t.date, cat)
    });
    let costliest_day = ledger::most_expensive_day(&transactions)
        .map(|(day, total)| format!("{} ({:.2})", day, total));

    let report = MonthReport {
        month: month.clone(),
        income: format!("{:.2}", totals.income),
        expenses: format!("{:.2}", totals.expenses),
        net: format!("{:.2}", totals.net),
        savings_band: savings.band.to_string(),
        savings_ratio_percent: format!("{:.0}", savings.ratio_percent),
        transactions: transactions.len(),
        by_category,
        largest_expense: largest,
        most_expensive_day: costliest_day,
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let mut rows = vec![
        vec!["Income".to_string(), report.income.clone()],
        vec!["Expenses".to_string(), report.expenses.clone()],
        vec!["Net".to_string(), report.net.clone()],
        vec![
            "Savings score".to_string(),
            format!("{} ({}%)", report.savings_band, report.savings_ratio_percent),
        ],
        vec!["Transactions".to_string(), report.transactions.to_string()],
    ];
    if let Some(ref e) = report.largest_expense {
        rows.push(vec!["Largest expense".to_string(), e.clone()]);
    }
    if let Some(ref d) = report.most_expensive_day {
        rows.push(vec!["Most expensive day".to_string(), d.clone()]);
    }
    let header = format!("Month {}", month);
    println!("{}", pretty_table(&[header.as_str(), "Value"], rows));

    if !report.by_category.is_empty() {
        let cat_rows: Vec<Vec<String>> = report
            .by_category
            .iter()
            .map(|c| vec![c.category.clone(), c.spent.clone()])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], cat_rows));
    }
    Ok(())
}
