use anchor_lang::prelude::*;
use serde::Serialize;
use team_vesting::VestingAccount;

use crate::time::format_utc;

/// One tranche as shown in reports and the run log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrancheReport {
    pub release_time: u64,
    pub release_utc: String,
    pub amount: u64,
    pub amount_ui: String,
    pub unlocked: bool,
}

/// Human-readable view of one vesting account at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountReport {
    pub address: String,
    pub beneficiary: String,
    pub mint: String,
    pub wallet_type: String,
    pub bump: u8,
    pub now: u64,
    pub now_utc: String,
    pub total: u64,
    pub unlocked: u64,
    pub claimed: u64,
    pub claimable: u64,
    pub total_ui: String,
    pub unlocked_ui: String,
    pub claimed_ui: String,
    pub claimable_ui: String,
    pub schedule: Vec<TrancheReport>,
}

pub fn describe_account(
    address: &Pubkey,
    account: &VestingAccount,
    now: u64,
    decimals: u8,
) -> Result<AccountReport> {
    let unlocked = account.unlocked_at(now)?;
    let claimable = account.claimable_at(now)?;

    let schedule = account
        .schedule
        .iter()
        .map(|entry| TrancheReport {
            release_time: entry.release_time,
            release_utc: format_utc(entry.release_time),
            amount: entry.amount,
            amount_ui: format_ui_amount(entry.amount, decimals),
            unlocked: entry.release_time <= now,
        })
        .collect();

    Ok(AccountReport {
        address: address.to_string(),
        beneficiary: account.authority.to_string(),
        mint: account.mint.to_string(),
        wallet_type: format!("{:?}", account.wallet_type),
        bump: account.bump,
        now,
        now_utc: format_utc(now),
        total: account.total_amount,
        unlocked,
        claimed: account.claimed_amount,
        claimable,
        total_ui: format_ui_amount(account.total_amount, decimals),
        unlocked_ui: format_ui_amount(unlocked, decimals),
        claimed_ui: format_ui_amount(account.claimed_amount, decimals),
        claimable_ui: format_ui_amount(claimable, decimals),
        schedule,
    })
}

/// Base units as a decimal string with trailing zeros trimmed.
/// Integer only, so large amounts keep every digit.
pub fn format_ui_amount(raw: u64, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    let digits = format!("{:0>width$}", raw, width = decimals as usize + 1);
    let (whole, frac) = digits.split_at(digits.len() - decimals as usize);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    }
}
