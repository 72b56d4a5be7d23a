// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::UserProfile;

/// Qualitative label for how actual savings compare to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SavingsBand {
    Excellent,
    Good,
    Fair,
    Poor,
    Low,
    Unknown,
}

impl fmt::Display for SavingsBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SavingsBand::Excellent => "Excellent",
            SavingsBand::Good => "Good",
            SavingsBand::Fair => "Fair",
            SavingsBand::Poor => "Poor",
            SavingsBand::Low => "Low",
            SavingsBand::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SavingsScore {
    pub band: SavingsBand,
    pub ratio_percent: Decimal,
}

/// Compare actual net savings against the expected savings target.
/// Without a profile or with zero income there is nothing to compare
/// against, so the score is Unknown at ratio zero.
pub fn score(
    profile: Option<&UserProfile>,
    actual_income: Decimal,
    net_amount: Decimal,
) -> SavingsScore {
    let Some(profile) = profile else {
        return SavingsScore {
            band: SavingsBand::Unknown,
            ratio_percent: Decimal::ZERO,
        };
    };
    if actual_income.is_zero() {
        return SavingsScore {
            band: SavingsBand::Unknown,
            ratio_percent: Decimal::ZERO,
        };
    }

    let expected = actual_income * profile.savings_percent.max(Decimal::ZERO) / Decimal::ONE_HUNDRED;
    let actual = net_amount.max(Decimal::ZERO);
    let ratio = if expected > Decimal::ZERO {
        actual / expected * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    SavingsScore {
        band: band_for(ratio),
        ratio_percent: ratio,
    }
}

// Lower bounds are inclusive.
fn band_for(ratio: Decimal) -> SavingsBand {
    if ratio >= Decimal::ONE_HUNDRED {
        SavingsBand::Excellent
    } else if ratio >= Decimal::from(75) {
        SavingsBand::Good
    } else if ratio >= Decimal::from(50) {
        SavingsBand::Fair
    } else if ratio >= Decimal::from(25) {
        SavingsBand::Poor
    } else {
        SavingsBand::Low
    }
}
