// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::allocation::ESSENTIALS_PERCENT;
use crate::models::UserProfile;
use crate::utils::{get_profile, maybe_print_json, parse_decimal, pretty_table, save_profile};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = UserProfile {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        salary: parse_decimal(sub.get_one::<String>("salary").unwrap().trim())?,
        savings_percent: parse_decimal(sub.get_one::<String>("savings-percent").unwrap().trim())?,
        buffer_percent: parse_decimal(sub.get_one::<String>("buffer-percent").unwrap().trim())?,
    };
    save_profile(conn, &profile)?;
    println!(
        "Profile saved: {} (salary {:.2}, savings {}%, buffer {}%)",
        profile.name, profile.salary, profile.savings_percent, profile.buffer_percent
    );
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let Some(profile) = get_profile(conn)? else {
        println!("No profile configured. Run 'moneyplan profile set' first.");
        return Ok(());
    };
    if maybe_print_json(json_flag, jsonl_flag, &profile)? {
        return Ok(());
    }

    let discretionary = (Decimal::ONE_HUNDRED
        - Decimal::from(ESSENTIALS_PERCENT)
        - profile.savings_percent.max(Decimal::ZERO)
        - profile.buffer_percent.max(Decimal::ZERO))
    .max(Decimal::ZERO);
    let rows = vec![
        vec!["Name".to_string(), profile.name.clone()],
        vec!["Monthly salary".to_string(), format!("{:.2}", profile.salary)],
        vec![
            "Essentials".to_string(),
            format!("{}%", ESSENTIALS_PERCENT),
        ],
        vec![
            "Savings".to_string(),
            format!("{}%", profile.savings_percent),
        ],
        vec!["Buffer".to_string(), format!("{}%", profile.buffer_percent)],
        vec!["Discretionary".to_string(), format!("{}%", discretionary)],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
