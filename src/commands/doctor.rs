// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::allocation::ESSENTIALS_PERCENT;
use crate::utils::{get_profile, list_goals, list_recurring, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Profile sanity
    match get_profile(conn)? {
        None => rows.push(vec!["missing_profile".into(), "run 'profile set'".into()]),
        Some(p) => {
            if p.savings_percent + p.buffer_percent
                >= Decimal::ONE_HUNDRED - Decimal::from(ESSENTIALS_PERCENT)
            {
                rows.push(vec![
                    "zero_discretionary".into(),
                    format!(
                        "savings {}% + buffer {}% leave no discretionary share",
                        p.savings_percent, p.buffer_percent
                    ),
                ]);
            }
            if p.salary <= Decimal::ZERO {
                rows.push(vec!["nonpositive_salary".into(), format!("{}", p.salary)]);
            }
        }
    }

    // 2) Goal invariant: 0 <= current <= target
    for g in list_goals(conn)? {
        if g.current > g.target || g.current < Decimal::ZERO {
            rows.push(vec![
                "goal_out_of_bounds".into(),
                format!("{} ({:.2} of {:.2})", g.name, g.current, g.target),
            ]);
        }
        if g.target <= Decimal::ZERO {
            rows.push(vec![
                "goal_zero_target".into(),
                format!("{} receives no funding share", g.name),
            ]);
        }
    }

    // 3) Recurring magnitudes are expected positive
    for r in list_recurring(conn)? {
        if r.amount <= Decimal::ZERO {
            rows.push(vec![
                "recurring_nonpositive".into(),
                format!("{} ({})", r.name, r.amount),
            ]);
        }
    }

    // 4) Uncategorized transactions
    let uncategorized: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE category_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    if uncategorized > 0 {
        rows.push(vec![
            "uncategorized_transactions".into(),
            format!("{} without a category", uncategorized),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
