use anchor_lang::prelude::*;

use crate::state::VestingAccount;
use crate::utils::unlock;

pub fn emit_claim_quote_handler(ctx: Context<EmitClaimQuote>) -> Result<()> {
    let vesting = &ctx.accounts.vesting_account;
    let now = unlock::clock_now()?;
    let unlocked = vesting.unlocked_at(now)?;
    let claimable = unlock::claimable_amount(unlocked, vesting.claimed_amount)?;

    emit!(ClaimQuote {
        vesting: vesting.key(),
        beneficiary: vesting.authority,
        now,
        total: vesting.total_amount,
        unlocked,
        claimed: vesting.claimed_amount,
        claimable,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitClaimQuote<'info> {
    pub vesting_account: Account<'info, VestingAccount>,
}

#[event]
pub struct ClaimQuote {
    pub vesting: Pubkey,
    pub beneficiary: Pubkey,
    pub now: u64,
    pub total: u64,
    pub unlocked: u64,
    pub claimed: u64,
    pub claimable: u64,
}
