//! Time → unlocked amount.
//!
//! - unlocked(now) = sum of tranche amounts with release_time <= now
//! - claimable = unlocked - claimed; claimed > unlocked is ledger corruption

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::VestingScheduleEntry;

pub fn unlocked_amount(schedule: &[VestingScheduleEntry], now: u64) -> Result<u64> {
    schedule
        .iter()
        .filter(|entry| entry.release_time <= now)
        .try_fold(0u64, |acc, entry| acc.checked_add(entry.amount))
        .ok_or_else(|| error!(VestingError::MathOverflow))
}

pub fn claimable_amount(unlocked: u64, claimed: u64) -> Result<u64> {
    unlocked
        .checked_sub(claimed)
        .ok_or_else(|| error!(VestingError::LedgerInconsistency))
}

/// Cluster clock as unsigned seconds. A pre-epoch clock unlocks nothing.
pub fn clock_now() -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    Ok(u64::try_from(now).unwrap_or_default())
}
