//! Address derivation shared by the program and off-chain tooling.

use anchor_lang::prelude::*;

use crate::constants::VESTING_SEED;
use crate::error::VestingError;

/// Vesting PDA for (beneficiary, mint). Doubles as the custody signer.
pub fn vesting_address(beneficiary: &Pubkey, mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VESTING_SEED, beneficiary.as_ref(), mint.as_ref()],
        program_id,
    )
}

/// Re-derives the custody signer from the material stored on the account.
pub fn vesting_signer(
    authority: &Pubkey,
    mint: &Pubkey,
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey> {
    Pubkey::create_program_address(
        &[VESTING_SEED, authority.as_ref(), mint.as_ref(), &[bump]],
        program_id,
    )
    .map_err(|_| error!(VestingError::InvalidPda))
}

/// ATA derivation: PDA(owner, token_program_id, mint) under the associated token program.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let seeds: &[&[u8]] = &[
        owner.as_ref(),
        anchor_spl::token::ID.as_ref(),
        mint.as_ref(),
    ];
    let (ata, _) = Pubkey::find_program_address(seeds, &anchor_spl::associated_token::ID);
    ata
}
