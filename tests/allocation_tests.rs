// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyplan::core::allocation::{allocate_gross, allocate_net_of_recurring};
use moneyplan::models::{Frequency, RecurringObligation, UserProfile};
use rust_decimal::Decimal;

fn profile(salary: &str, savings: &str, buffer: &str) -> UserProfile {
    UserProfile {
        name: "Asha".into(),
        salary: salary.parse().unwrap(),
        savings_percent: savings.parse().unwrap(),
        buffer_percent: buffer.parse().unwrap(),
    }
}

fn obligation(id: i64, amount: &str) -> RecurringObligation {
    RecurringObligation {
        id,
        name: format!("bill-{}", id),
        category_id: None,
        amount: amount.parse().unwrap(),
        frequency: Frequency::Monthly,
    }
}

#[test]
fn gross_split_uses_fixed_essentials_half() {
    let alloc = allocate_gross(Some(&profile("5000", "15", "10")), None);
    assert_eq!(format!("{:.2}", alloc.essentials), "2500.00");
    assert_eq!(format!("{:.2}", alloc.savings), "750.00");
    assert_eq!(format!("{:.2}", alloc.discretionary), "1250.00");
    assert_eq!(format!("{:.2}", alloc.buffer), "500.00");
}

#[test]
fn shares_sum_to_the_income_basis() {
    let p = profile("3210.55", "20", "5");
    let alloc = allocate_gross(Some(&p), None);
    let sum = alloc.essentials + alloc.savings + alloc.discretionary + alloc.buffer;
    assert_eq!(sum, p.salary);
}

#[test]
fn discretionary_clamps_to_zero_when_overcommitted() {
    // savings + buffer > 50 leaves nothing discretionary, never a negative.
    let alloc = allocate_gross(Some(&profile("4000", "40", "20")), None);
    assert!(alloc.discretionary.is_zero());
    assert_eq!(format!("{:.2}", alloc.savings), "1600.00");
    assert_eq!(format!("{:.2}", alloc.buffer), "800.00");
}

#[test]
fn positive_actual_income_overrides_salary() {
    let alloc = allocate_gross(Some(&profile("5000", "15", "10")), Some("2000".parse().unwrap()));
    assert_eq!(format!("{:.2}", alloc.essentials), "1000.00");
    assert_eq!(format!("{:.2}", alloc.savings), "300.00");
}

#[test]
fn zero_actual_income_falls_back_to_salary() {
    let alloc = allocate_gross(Some(&profile("5000", "15", "10")), Some(Decimal::ZERO));
    assert_eq!(format!("{:.2}", alloc.essentials), "2500.00");
}

#[test]
fn missing_profile_or_zero_salary_yields_all_zero() {
    let alloc = allocate_gross(None, Some("5000".parse().unwrap()));
    assert!(alloc.essentials.is_zero() && alloc.savings.is_zero());
    assert!(alloc.discretionary.is_zero() && alloc.buffer.is_zero());

    let alloc = allocate_gross(Some(&profile("0", "15", "10")), None);
    assert!(alloc.essentials.is_zero() && alloc.savings.is_zero());
}

#[test]
fn negative_percents_are_treated_as_zero() {
    let alloc = allocate_gross(Some(&profile("1000", "-20", "10")), None);
    assert!(alloc.savings.is_zero());
    // 100 - 50 - 0 - 10 = 40
    assert_eq!(format!("{:.2}", alloc.discretionary), "400.00");
}

#[test]
fn net_variant_subtracts_recurring_before_splitting() {
    let recurring = vec![obligation(1, "1000"), obligation(2, "500")];
    let alloc = allocate_net_of_recurring(Some(&profile("5000", "15", "10")), None, &recurring);
    // Available basis is 3500.
    assert_eq!(format!("{:.2}", alloc.essentials), "1750.00");
    assert_eq!(format!("{:.2}", alloc.savings), "525.00");
    assert_eq!(format!("{:.2}", alloc.discretionary), "875.00");
    assert_eq!(format!("{:.2}", alloc.buffer), "350.00");
}

#[test]
fn net_variant_floors_available_at_zero() {
    let recurring = vec![obligation(1, "6000")];
    let alloc = allocate_net_of_recurring(Some(&profile("5000", "15", "10")), None, &recurring);
    assert!(alloc.essentials.is_zero() && alloc.savings.is_zero());
    assert!(alloc.discretionary.is_zero() && alloc.buffer.is_zero());
}

#[test]
fn net_variant_ignores_negative_obligations() {
    let recurring = vec![obligation(1, "-300"), obligation(2, "500")];
    let alloc = allocate_net_of_recurring(Some(&profile("5000", "15", "10")), None, &recurring);
    // Only the 500 commitment counts; basis is 4500.
    assert_eq!(format!("{:.2}", alloc.essentials), "2250.00");
}
