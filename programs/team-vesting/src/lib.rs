#![allow(unexpected_cfgs)]

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use error::*;
pub use instructions::*;
pub use state::*;

declare_id!("TEAM556Swko2ytgQZoZ314X6XN5erfx42u53sJj63ts");

#[program]
pub mod team_vesting {
    use super::*;

    /// Creates the beneficiary's vesting PDA and moves `total_amount` from the
    /// admin into the PDA-owned custody account. Admin only.
    pub fn initialize_vesting(
        ctx: Context<InitializeVesting>,
        wallet_type: WalletType,
        total_amount: u64,
        schedule: Vec<VestingScheduleEntry>,
    ) -> Result<()> {
        initialize_vesting::initialize_vesting_handler(ctx, wallet_type, total_amount, schedule)
    }

    /// Pays the beneficiary everything unlocked and not yet claimed.
    pub fn claim_unlocked(ctx: Context<ClaimUnlocked>) -> Result<()> {
        claim_unlocked::claim_unlocked_handler(ctx)
    }

    /// Same payout as `claim_unlocked`, triggered by the admin.
    pub fn admin_distribute_unlocked(ctx: Context<AdminDistribute>) -> Result<()> {
        admin_distribute_unlocked::admin_distribute_unlocked_handler(ctx)
    }

    pub fn emit_claim_quote(ctx: Context<EmitClaimQuote>) -> Result<()> {
        emit_claim_quote::emit_claim_quote_handler(ctx)
    }
}
