use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::VestingError;
use crate::state::VestingAccount;
use crate::utils::{pda, unlock};

/// Token account facts the claim checks read, detached from `AccountInfo`
/// so the same checks run on-chain and in off-chain simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimAccounts {
    pub custody: Pubkey,
    pub custody_mint: Pubkey,
    pub custody_owner: Pubkey,
    pub destination_mint: Pubkey,
    pub vesting_signer: Pubkey,
}

impl ClaimAccounts {
    pub fn from_token_accounts(
        custody: &Account<TokenAccount>,
        destination: &Account<TokenAccount>,
        vesting_signer: Pubkey,
    ) -> Self {
        Self {
            custody: custody.key(),
            custody_mint: custody.mint,
            custody_owner: custody.owner,
            destination_mint: destination.mint,
            vesting_signer,
        }
    }
}

/// Mint, derivation and ownership checks, in that order.
pub fn verify_claim_accounts(
    vesting: &VestingAccount,
    accounts: &ClaimAccounts,
    program_id: &Pubkey,
) -> Result<()> {
    require_keys_eq!(accounts.custody_mint, vesting.mint, VestingError::InvalidMint);
    require_keys_eq!(
        accounts.destination_mint,
        vesting.mint,
        VestingError::InvalidMint
    );

    let expected_signer =
        pda::vesting_signer(&vesting.authority, &vesting.mint, vesting.bump, program_id)?;
    require_keys_eq!(
        accounts.vesting_signer,
        expected_signer,
        VestingError::InvalidPda
    );
    require_keys_eq!(
        accounts.custody,
        pda::associated_token_address(&expected_signer, &vesting.mint),
        VestingError::InvalidPda
    );

    require_keys_eq!(
        accounts.custody_owner,
        expected_signer,
        VestingError::InvalidOwner
    );
    Ok(())
}

pub fn authorize_beneficiary(vesting: &VestingAccount, signer: &Pubkey) -> Result<()> {
    require_keys_eq!(*signer, vesting.authority, VestingError::InvalidAuthority);
    Ok(())
}

/// Whole currently-claimable amount; there are no partial claims.
pub fn payable_amount(vesting: &VestingAccount, now: u64) -> Result<u64> {
    let claimable = vesting.claimable_at(now)?;
    require!(claimable > 0, VestingError::NothingToClaim);
    Ok(claimable)
}

/// CPI transfer from custody, signed by the vesting PDA.
pub(crate) fn transfer_from_custody<'info>(
    vesting: &VestingAccount,
    token_program: AccountInfo<'info>,
    custody: AccountInfo<'info>,
    destination: AccountInfo<'info>,
    vesting_signer: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let bump = [vesting.bump];
    let seeds = vesting.signer_seeds(&bump);
    let signer_seeds: &[&[&[u8]]] = &[&seeds];
    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from: custody,
                to: destination,
                authority: vesting_signer,
            },
            signer_seeds,
        ),
        amount,
    )
}

pub fn claim_unlocked_handler(ctx: Context<ClaimUnlocked>) -> Result<()> {
    let vesting = &ctx.accounts.vesting_account;
    let accounts = ClaimAccounts::from_token_accounts(
        &ctx.accounts.vesting_token_account,
        &ctx.accounts.destination_token_account,
        ctx.accounts.vesting_signer.key(),
    );
    verify_claim_accounts(vesting, &accounts, ctx.program_id)?;
    authorize_beneficiary(vesting, &ctx.accounts.authority.key())?;

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
        "Claimed {} tokens for beneficiary: {} ({}/{})",
        claimable,
        vesting.authority,
        vesting.claimed_amount,
        vesting.total_amount
    );

    emit!(TokensClaimed {
        vesting: vesting.key(),
        beneficiary: vesting.authority,
        initiator: ctx.accounts.authority.key(),
        admin_initiated: false,
        amount: claimable,
        claimed_total: vesting.claimed_amount,
        remaining: vesting.remaining(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ClaimUnlocked<'info> {
    #[account(mut)]
    pub vesting_account: Account<'info, VestingAccount>,

    pub authority: Signer<'info>,

    #[account(mut)]
    pub vesting_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub destination_token_account: Account<'info, TokenAccount>,

    /// CHECK: Re-derived from the stored bump in `verify_claim_accounts`.
    pub vesting_signer: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub vesting: Pubkey,
    pub beneficiary: Pubkey,
    pub initiator: Pubkey,
    pub admin_initiated: bool,
    pub amount: u64,
    pub claimed_total: u64,
    pub remaining: u64,
}
