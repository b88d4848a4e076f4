use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::ADMIN_PUBKEY;
use crate::error::VestingError;
use crate::instructions::claim_unlocked::{
    payable_amount, transfer_from_custody, verify_claim_accounts, ClaimAccounts, TokensClaimed,
};
use crate::state::VestingAccount;
use crate::utils::unlock;

/// Admin-triggered payout. The admin only decides *when*; the payee stays
/// the beneficiary, enforced through the destination owner.
pub fn authorize_admin_distribution(
    vesting: &VestingAccount,
    admin: &Pubkey,
    beneficiary: &Pubkey,
    destination_owner: &Pubkey,
) -> Result<()> {
    require_keys_eq!(*admin, ADMIN_PUBKEY, VestingError::Unauthorized);
    require_keys_eq!(
        *beneficiary,
        vesting.authority,
        VestingError::InvalidAuthority
    );
    require_keys_eq!(
        *destination_owner,
        vesting.authority,
        VestingError::InvalidAuthority
    );
    Ok(())
}

pub fn admin_distribute_unlocked_handler(ctx: Context<AdminDistribute>) -> Result<()> {
    let vesting = &ctx.accounts.vesting_account;
    let accounts = ClaimAccounts::from_token_accounts(
        &ctx.accounts.vesting_token_account,
        &ctx.accounts.destination_token_account,
        ctx.accounts.vesting_signer.key(),
    );
    verify_claim_accounts(vesting, &accounts, ctx.program_id)?;
    authorize_admin_distribution(
        vesting,
        &ctx.accounts.admin.key(),
        &ctx.accounts.authority.key(),
        &ctx.accounts.destination_token_account.owner,
    )?;

    let now = unlock::clock_now()?;
    let claimable = payable_amount(vesting, now)?;

    transfer_from_custody(
        vesting,
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vesting_token_account.to_account_info(),
        ctx.accounts.destination_token_account.to_account_info(),
        ctx.accounts.vesting_signer.to_account_info(),
        claimable,
    )?;

    let vesting = &mut ctx.accounts.vesting_account;
    vesting.record_claim(claimable)?;

    msg!(
        "Admin distributed {} tokens to beneficiary: {} ({}/{})",
        claimable,
        vesting.authority,
        vesting.claimed_amount,
        vesting.total_amount
    );

    emit!(TokensClaimed {
        vesting: vesting.key(),
        beneficiary: vesting.authority,
        initiator: ctx.accounts.admin.key(),
        admin_initiated: true,
        amount: claimable,
        claimed_total: vesting.claimed_amount,
        remaining: vesting.remaining(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct AdminDistribute<'info> {
    pub admin: Signer<'info>,

    #[account(mut)]
    pub vesting_account: Account<'info, VestingAccount>,

    /// CHECK: Beneficiary key, compared with `vesting_account.authority` in the handler.
    pub authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub vesting_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub destination_token_account: Account<'info, TokenAccount>,

    /// CHECK: Re-derived from the stored bump in `verify_claim_accounts`.
    pub vesting_signer: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}
