// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{Allocation, RecurringObligation, UserProfile};

/// Essentials always take a fixed half of the income basis; only the
/// discretionary share flexes to absorb the user's savings and buffer
/// percentages.
pub const ESSENTIALS_PERCENT: u32 = 50;

/// Split the gross income basis into essentials/savings/discretionary/buffer.
/// `actual_income` overrides the profile salary when it is positive; a zero
/// or negative basis (or a missing profile) yields the all-zero allocation.
pub fn allocate_gross(profile: Option<&UserProfile>, actual_income: Option<Decimal>) -> Allocation {
    let Some(profile) = profile else {
        return Allocation::default();
    };
    split(income_basis(profile, actual_income), profile)
}

/// Like [`allocate_gross`], but nets out recurring obligations first: the
/// percentage split applies to `basis - sum(recurring amounts)`, floored at
/// zero when commitments exceed income.
pub fn allocate_net_of_recurring(
    profile: Option<&UserProfile>,
    actual_income: Option<Decimal>,
    recurring: &[RecurringObligation],
) -> Allocation {
    let Some(profile) = profile else {
        return Allocation::default();
    };
    let committed: Decimal = recurring
        .iter()
        .map(|r| r.amount.max(Decimal::ZERO))
        .sum();
    let available = (income_basis(profile, actual_income) - committed).max(Decimal::ZERO);
    split(available, profile)
}

fn income_basis(profile: &UserProfile, actual_income: Option<Decimal>) -> Decimal {
    match actual_income {
        Some(income) if income > Decimal::ZERO => income,
        _ => profile.salary.max(Decimal::ZERO),
    }
}

fn split(basis: Decimal, profile: &UserProfile) -> Allocation {
    if basis <= Decimal::ZERO {
        return Allocation::default();
    }
    let essentials_pct = Decimal::from(ESSENTIALS_PERCENT);
    let savings_pct = profile.savings_percent.max(Decimal::ZERO);
    let buffer_pct = profile.buffer_percent.max(Decimal::ZERO);
    // A profile where savings + buffer exceed the non-essential half gets
    // zero discretionary, never a negative one.
    let discretionary_pct =
        (Decimal::ONE_HUNDRED - essentials_pct - savings_pct - buffer_pct).max(Decimal::ZERO);

    Allocation {
        essentials: percent_of(basis, essentials_pct),
        savings: percent_of(basis, savings_pct),
        discretionary: percent_of(basis, discretionary_pct),
        buffer: percent_of(basis, buffer_pct),
    }
}

fn percent_of(basis: Decimal, percent: Decimal) -> Decimal {
    basis * percent / Decimal::ONE_HUNDRED
}
