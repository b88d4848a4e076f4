use anchor_lang::prelude::*;

/// Error codes of the vesting program. Variant order is part of the wire
/// format (codes start at 6000); append new variants at the end.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: only the admin can perform this action")]
    Unauthorized,

    #[msg("Invalid schedule: shape, amounts or sum do not match")]
    InvalidSchedule,

    #[msg("Invalid mint: token account mint does not match the vesting mint")]
    InvalidMint,

    #[msg("Nothing to claim: no tokens are currently claimable")]
    NothingToClaim,

    #[msg("Invalid authority: signer or payee does not match the vesting beneficiary")]
    InvalidAuthority,

    #[msg("Invalid PDA: vesting signer or custody account is not the derived address")]
    InvalidPda,

    #[msg("Invalid owner: custody token account is not owned by the vesting PDA")]
    InvalidOwner,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Admin token account balance is below the vesting total")]
    InsufficientFunds,

    #[msg("Custody balance does not equal the vesting total after deposit")]
    CustodyBalanceMismatch,

    #[msg("Ledger inconsistency: claimed amount exceeds unlocked or total amount")]
    LedgerInconsistency,
}
