// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A recorded cash movement. Positive amounts are income, negative are
/// expenses; the sign convention is relied on by the ledger aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub category_id: Option<i64>,
    pub amount: Decimal,
    pub method: Option<String>,
    pub note: Option<String>,
}

/// A scheduled future expense. Recurring items are never auto-posted as
/// transactions; the two collections stay independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringObligation {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub amount: Decimal,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("invalid frequency '{0}', expected daily|weekly|monthly|yearly")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(ParseFrequencyError(other.to_string())),
        }
    }
}

/// A savings goal. Invariant: 0 <= current <= target, enforced by clamping
/// on every write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub deadline: Option<NaiveDate>,
}

/// The single-row user configuration driving the allocation split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub salary: Decimal,
    pub savings_percent: Decimal,
    pub buffer_percent: Decimal,
}

/// The four-way split of a month's usable income. Derived, never the
/// source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub essentials: Decimal,
    pub savings: Decimal,
    pub discretionary: Decimal,
    pub buffer: Decimal,
}
