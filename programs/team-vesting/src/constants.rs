//! Program-wide constants.

use anchor_lang::prelude::*;

/// Seed prefix of the vesting PDA. The same address signs custody transfers.
pub const VESTING_SEED: &[u8] = b"vesting";

/// Admin wallet allowed to create schedules and trigger admin distributions.
pub const ADMIN_PUBKEY: Pubkey = pubkey!("5hPhdLYWdC1zGiryjXafRPrgQ8FpR79q8259mQZXE6zQ");

/// Longest release plan (Dev / Marketing).
pub const MAX_TRANCHES: usize = 4;

/// Denominator for release plan shares.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seconds per week (UTC, no leap seconds).
pub const SECONDS_PER_WEEK: u64 = 604_800;

/// One step of a wallet class release plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedTranche {
    /// Weeks after the schedule start.
    pub weeks: u64,
    /// Share of the total in basis points. The last tranche takes the remainder.
    pub bps: u64,
}

const fn tranche(weeks: u64, bps: u64) -> PlannedTranche {
    PlannedTranche { weeks, bps }
}

/// Dev: 5% at 2w, 15% at 24w, 30% at 30w, 50% at 36w.
pub const DEV_PLAN: [PlannedTranche; 4] = [
    tranche(2, 500),
    tranche(24, 1_500),
    tranche(30, 3_000),
    tranche(36, 5_000),
];

/// Marketing: 10% at 2w, 15% at 6w, 25% at 10w, 50% at 14w.
pub const MARKETING_PLAN: [PlannedTranche; 4] = [
    tranche(2, 1_000),
    tranche(6, 1_500),
    tranche(10, 2_500),
    tranche(14, 5_000),
];

/// Presale1: 50% at 4w, 50% at 8w.
pub const PRESALE1_PLAN: [PlannedTranche; 2] = [tranche(4, 5_000), tranche(8, 5_000)];

/// Presale2: 100% at 12w.
pub const PRESALE2_PLAN: [PlannedTranche; 1] = [tranche(12, 10_000)];
