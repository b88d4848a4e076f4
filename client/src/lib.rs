//! Off-chain tooling for the team vesting program: instruction builders,
//! account reports and the batch distributor.

pub mod config;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod report;
pub mod run_log;
pub mod sweep;
pub mod time;

#[cfg(test)]
mod mock;

pub use config::DistributorConfig;
pub use error::DistributorError;
pub use ledger::{AccountStore, ClaimSubmitter};
pub use report::{describe_account, AccountReport};
pub use sweep::{run, Distributor, SweepStats};
