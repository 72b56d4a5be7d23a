// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

/// Scopes an aggregation to one calendar month, optionally to one category.
#[derive(Debug, Clone, Copy)]
pub struct LedgerFilter {
    pub year: i32,
    pub month: u32,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    /// Expense magnitudes keyed by category. Uncategorized expenses count
    /// toward `expenses` but have no entry here.
    pub by_category: BTreeMap<i64, Decimal>,
}

/// First and last day of a calendar month, or None for an invalid month.
/// The last day is day zero of the following month, so February lands on
/// 29 in leap years without special-casing.
pub fn month_span(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_y, next_m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_y, next_m, 1)?.pred_opt()?;
    Some((start, end))
}

/// Reduce a transaction list to income/expense/net totals and a per-category
/// expense breakdown. Pure; an empty or fully filtered-out input yields the
/// all-zero result.
pub fn aggregate(transactions: &[Transaction], filter: Option<&LedgerFilter>) -> LedgerTotals {
    let span = match filter {
        Some(f) => match month_span(f.year, f.month) {
            Some(span) => Some(span),
            // An unrepresentable month matches nothing.
            None => return LedgerTotals::default(),
        },
        None => None,
    };

    let mut totals = LedgerTotals::default();
    for t in transactions {
        if let Some((start, end)) = span {
            if t.date < start || t.date > end {
                continue;
            }
        }
        if let Some(want) = filter.and_then(|f| f.category_id) {
            if t.category_id != Some(want) {
                continue;
            }
        }

        if t.amount > Decimal::ZERO {
            totals.income += t.amount;
        } else {
            let magnitude = -t.amount;
            totals.expenses += magnitude;
            if let Some(cat) = t.category_id {
                *totals.by_category.entry(cat).or_insert(Decimal::ZERO) += magnitude;
            }
        }
    }
    totals.net = totals.income - totals.expenses;
    totals
}

/// The single expense with the largest magnitude, if any. Ties resolve to
/// the earliest-seen transaction.
pub fn largest_expense(transactions: &[Transaction]) -> Option<&Transaction> {
    let mut best: Option<&Transaction> = None;
    for t in transactions.iter().filter(|t| t.amount < Decimal::ZERO) {
        match best {
            Some(b) if -t.amount <= -b.amount => {}
            _ => best = Some(t),
        }
    }
    best
}

/// The calendar day with the highest total expense magnitude. Ties resolve
/// to the earliest such day.
pub fn most_expensive_day(transactions: &[Transaction]) -> Option<(NaiveDate, Decimal)> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for t in transactions {
        if t.amount < Decimal::ZERO {
            *by_day.entry(t.date).or_insert(Decimal::ZERO) += -t.amount;
        }
    }
    let mut best: Option<(NaiveDate, Decimal)> = None;
    for (day, total) in by_day {
        match best {
            Some((_, max)) if total <= max => {}
            _ => best = Some((day, total)),
        }
    }
    best
}
