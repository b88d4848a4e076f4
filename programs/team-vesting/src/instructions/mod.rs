pub mod initialize_vesting;
pub mod claim_unlocked;
pub mod admin_distribute_unlocked;
pub mod emit_claim_quote;

pub use initialize_vesting::*;
pub use claim_unlocked::*;
pub use admin_distribute_unlocked::*;
pub use emit_claim_quote::*;
