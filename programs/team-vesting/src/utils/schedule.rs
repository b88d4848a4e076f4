//! Schedule validation and release-plan construction.

use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, SECONDS_PER_WEEK};
use crate::error::VestingError;
use crate::state::{VestingScheduleEntry, WalletType};

/// Checks a proposed schedule against its wallet class and the deposit total.
pub fn validate_schedule(
    wallet_type: WalletType,
    schedule: &[VestingScheduleEntry],
    total_amount: u64,
) -> Result<()> {
    require!(!schedule.is_empty(), VestingError::InvalidSchedule);
    require!(
        schedule.len() == wallet_type.tranche_count(),
        VestingError::InvalidSchedule
    );

    let mut sum = 0u64;
    for entry in schedule {
        require!(entry.amount > 0, VestingError::InvalidSchedule);
        sum = sum
            .checked_add(entry.amount)
            .ok_or(VestingError::InvalidSchedule)?;
    }
    require!(sum == total_amount, VestingError::InvalidSchedule);
    Ok(())
}

/// Splits `total_amount` along the wallet class plan, starting at `start_ts`.
/// All tranches but the last are floored; the last takes the exact remainder.
pub fn build_schedule(
    wallet_type: WalletType,
    total_amount: u64,
    start_ts: u64,
) -> Result<Vec<VestingScheduleEntry>> {
    let plan = wallet_type.release_plan();
    let mut schedule = Vec::with_capacity(plan.len());
    let mut allocated = 0u64;

    for (i, step) in plan.iter().enumerate() {
        let amount = if i + 1 == plan.len() {
            total_amount
                .checked_sub(allocated)
                .ok_or(VestingError::MathOverflow)?
        } else {
            let share = (total_amount as u128)
                .checked_mul(step.bps as u128)
                .ok_or(VestingError::MathOverflow)?
                / (BPS_DENOMINATOR as u128);
            u64::try_from(share).map_err(|_| VestingError::MathOverflow)?
        };
        allocated = allocated
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        schedule.push(VestingScheduleEntry {
            release_time: weeks_after(start_ts, step.weeks)?,
            amount,
        });
    }

    Ok(schedule)
}

pub fn weeks_after(start_ts: u64, weeks: u64) -> Result<u64> {
    weeks
        .checked_mul(SECONDS_PER_WEEK)
        .and_then(|offset| start_ts.checked_add(offset))
        .ok_or_else(|| error!(VestingError::MathOverflow))
}
