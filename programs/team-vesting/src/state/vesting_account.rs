use anchor_lang::prelude::*;

use crate::constants::{
    PlannedTranche, DEV_PLAN, MARKETING_PLAN, MAX_TRANCHES, PRESALE1_PLAN, PRESALE2_PLAN,
    VESTING_SEED,
};
use crate::error::VestingError;
use crate::utils::unlock;

/// One beneficiary's vesting position for one mint (PDA).
///
/// Field order is the stored layout; do not reorder.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct VestingAccount {
    /// Beneficiary allowed to claim. Part of the PDA seeds.
    pub authority: Pubkey,
    /// Token mint the position is denominated in. Part of the PDA seeds.
    pub mint: Pubkey,
    /// Sum of all tranche amounts, fixed at creation.
    pub total_amount: u64,
    /// Cumulative amount paid out. Never decreases.
    pub claimed_amount: u64,
    /// Tranches, summed by predicate (order is not relied on).
    pub schedule: Vec<VestingScheduleEntry>,
    /// Wallet class the schedule was validated against.
    pub wallet_type: WalletType,
    /// Bump of the vesting PDA, required to sign custody transfers.
    pub bump: u8,
}

impl VestingAccount {
    pub const SIZE: usize =
        32 + // authority
        32 + // mint
        8 +  // total_amount
        8 +  // claimed_amount
        4 + MAX_TRANCHES * VestingScheduleEntry::SIZE + // schedule
        1 +  // wallet_type
        1;   // bump

    /// Cumulative amount released at `now`.
    pub fn unlocked_at(&self, now: u64) -> Result<u64> {
        unlock::unlocked_amount(&self.schedule, now)
    }

    /// Unlocked minus already claimed. Errors instead of clamping when the
    /// ledger says more was claimed than has unlocked.
    pub fn claimable_at(&self, now: u64) -> Result<u64> {
        let unlocked = self.unlocked_at(now)?;
        unlock::claimable_amount(unlocked, self.claimed_amount)
    }

    /// Books a payout. `claimed_amount` only grows and never passes the total.
    pub fn record_claim(&mut self, amount: u64) -> Result<()> {
        let claimed = self
            .claimed_amount
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        require!(
            claimed <= self.total_amount,
            VestingError::LedgerInconsistency
        );
        self.claimed_amount = claimed;
        Ok(())
    }

    /// Tokens still owed by custody.
    pub fn remaining(&self) -> u64 {
        self.total_amount.saturating_sub(self.claimed_amount)
    }

    pub fn is_fully_claimed(&self) -> bool {
        self.claimed_amount >= self.total_amount
    }

    /// Seeds the vesting PDA signs custody transfers with. Same order as
    /// the `init` seeds of `InitializeVesting`.
    pub fn signer_seeds<'a>(&'a self, bump: &'a [u8; 1]) -> [&'a [u8]; 4] {
        [VESTING_SEED, self.authority.as_ref(), self.mint.as_ref(), &bump[..]]
    }
}

/// A single tranche: `amount` unlocks once the clock reaches `release_time`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingScheduleEntry {
    /// Unix timestamp (seconds, UTC).
    pub release_time: u64,
    /// Token base units.
    pub amount: u64,
}

impl VestingScheduleEntry {
    pub const SIZE: usize = 8 + 8;
}

/// Beneficiary class. Selects the release plan checked at creation only.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletType {
    Dev,
    Marketing,
    Presale1,
    Presale2,
}

impl WalletType {
    pub const ALL: [WalletType; 4] = [
        WalletType::Dev,
        WalletType::Marketing,
        WalletType::Presale1,
        WalletType::Presale2,
    ];

    pub fn release_plan(&self) -> &'static [PlannedTranche] {
        match self {
            WalletType::Dev => &DEV_PLAN,
            WalletType::Marketing => &MARKETING_PLAN,
            WalletType::Presale1 => &PRESALE1_PLAN,
            WalletType::Presale2 => &PRESALE2_PLAN,
        }
    }

    /// Number of tranches a schedule of this class must have.
    pub fn tranche_count(&self) -> usize {
        self.release_plan().len()
    }
}
