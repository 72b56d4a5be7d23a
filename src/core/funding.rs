// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::Goal;

/// Progress updates smaller than a cent are dropped to avoid churn from
/// fractional shares.
fn min_update() -> Decimal {
    Decimal::new(1, 2)
}

/// Keep a goal's progress inside [0, target].
pub fn clamp_progress(current: Decimal, target: Decimal) -> Decimal {
    current.max(Decimal::ZERO).min(target.max(Decimal::ZERO))
}

/// Apply a direct user contribution (positive or negative) to a goal,
/// clamped to the invariant bounds.
pub fn apply_contribution(goal: &Goal, amount: Decimal) -> Goal {
    Goal {
        current: clamp_progress(goal.current + amount, goal.target),
        ..goal.clone()
    }
}

/// Distribute a savings pool across goals, proportionally to each goal's
/// FULL target rather than its remaining gap: a nearly funded goal still
/// draws a share sized by its target, and the clamp discards the overshoot.
/// Returns the full goal list; goals whose progress moved by a cent or less
/// come back untouched. A nonpositive pool, empty goal set, or zero total
/// target is a no-op.
pub fn distribute(pool: Decimal, goals: &[Goal]) -> Vec<Goal> {
    if pool <= Decimal::ZERO || goals.is_empty() {
        return goals.to_vec();
    }
    let total_target: Decimal = goals.iter().map(|g| g.target.max(Decimal::ZERO)).sum();
    if total_target <= Decimal::ZERO {
        return goals.to_vec();
    }

    goals
        .iter()
        .map(|goal| {
            let target = goal.target.max(Decimal::ZERO);
            // Multiply before dividing so integral shares stay exact.
            let share = target * pool / total_target;
            let next = clamp_progress(goal.current + share, target);
            if (next - goal.current).abs() > min_update() {
                Goal {
                    current: next,
                    ..goal.clone()
                }
            } else {
                goal.clone()
            }
        })
        .collect()
}
