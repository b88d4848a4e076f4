use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{ADMIN_PUBKEY, VESTING_SEED};
use crate::error::VestingError;
use crate::state::{VestingAccount, VestingScheduleEntry, WalletType};
use crate::utils::schedule::validate_schedule;

pub fn initialize_vesting_handler(
    ctx: Context<InitializeVesting>,
    wallet_type: WalletType,
    total_amount: u64,
    schedule: Vec<VestingScheduleEntry>,
) -> Result<()> {
    validate_schedule(wallet_type, &schedule, total_amount)?;

    let mint = ctx.accounts.mint.key();
    let admin = ctx.accounts.admin.key();
    let source = &ctx.accounts.admin_token_account;
    require_keys_eq!(source.mint, mint, VestingError::InvalidMint);
    require_keys_eq!(source.owner, admin, VestingError::Unauthorized);
    require!(
        source.amount >= total_amount,
        VestingError::InsufficientFunds
    );

    let beneficiary = ctx.accounts.beneficiary.key();
    let tranches = schedule.len();
    ctx.accounts.vesting_account.set_inner(VestingAccount {
        authority: beneficiary,
        mint,
        total_amount,
        claimed_amount: 0,
        schedule,
        wallet_type,
        bump: ctx.bumps.vesting_account,
    });

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.admin_token_account.to_account_info(),
                to: ctx.accounts.vesting_token_account.to_account_info(),
                authority: ctx.accounts.admin.to_account_info(),
            },
        ),
        total_amount,
    )?;

    // Freshly created custody must hold exactly the deposit.
    ctx.accounts.vesting_token_account.reload()?;
    require!(
        ctx.accounts.vesting_token_account.amount == total_amount,
        VestingError::CustodyBalanceMismatch
    );

    msg!("Vesting account initialized for beneficiary: {}", beneficiary);
    msg!("Total amount vested: {} in {} tranches", total_amount, tranches);

    emit!(VestingInitialized {
        vesting: ctx.accounts.vesting_account.key(),
        beneficiary,
        mint,
        wallet_type,
        total_amount,
        tranches: tranches as u8,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVesting<'info> {
    #[account(mut, address = ADMIN_PUBKEY @ VestingError::Unauthorized)]
    pub admin: Signer<'info>,

    #[account(mut)]
    pub admin_token_account: Account<'info, TokenAccount>,

    /// CHECK: Only the key is used, as PDA seed and stored authority.
    pub beneficiary: UncheckedAccount<'info>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = 8 + VestingAccount::SIZE,
        seeds = [VESTING_SEED, beneficiary.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub vesting_account: Account<'info, VestingAccount>,

    #[account(
        init,
        payer = admin,
        associated_token::mint = mint,
        associated_token::authority = vesting_account
    )]
    pub vesting_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

#[event]
pub struct VestingInitialized {
    pub vesting: Pubkey,
    pub beneficiary: Pubkey,
    pub mint: Pubkey,
    pub wallet_type: WalletType,
    pub total_amount: u64,
    pub tranches: u8,
}
