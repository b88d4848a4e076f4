//! Batch distribution: one admin-initiated claim per vesting account with
//! something claimable, every outcome appended to the run log.

use std::fs::File;
use std::io::Write;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use serde::Serialize;
use team_vesting::VestingAccount;

use crate::config::DistributorConfig;
use crate::error::{classify, DistributorError, FailureKind};
use crate::instructions::{admin_distribute_unlocked, ClaimAddresses};
use crate::ledger::{load_vesting_accounts, AccountStore, ClaimSubmitter};
use crate::report::{describe_account, format_ui_amount, AccountReport};
use crate::run_log::{RunLog, RunRecord};
use crate::time::unix_now;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    pub total_accounts: usize,
    /// Accounts owed a payout: submitted, or found with unreadable state.
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Sum of successfully distributed base units.
    pub distributed: u64,
}

impl SweepStats {
    fn count(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Distributed { amount, .. } => {
                self.processed += 1;
                self.successful += 1;
                self.distributed = self.distributed.saturating_add(*amount);
            }
            Outcome::Failed { .. } => {
                self.processed += 1;
                self.failed += 1;
            }
            Outcome::Skipped { .. } => self.skipped += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Distributed {
        signature: String,
        amount: u64,
        attempts: u32,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
        attempts: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountEntry {
    /// 1-based position in the sweep.
    pub index: usize,
    pub address: String,
    pub report: Option<AccountReport>,
    pub outcome: Outcome,
}

pub struct Distributor<'a, S, C, W: Write> {
    config: &'a DistributorConfig,
    store: &'a S,
    submitter: &'a C,
    log: RunLog<W>,
    entries: Vec<AccountEntry>,
    stats: SweepStats,
    log_failures: usize,
}

impl<'a, S, C, W> Distributor<'a, S, C, W>
where
    S: AccountStore,
    C: ClaimSubmitter,
    W: Write,
{
    pub fn new(config: &'a DistributorConfig, store: &'a S, submitter: &'a C, log: RunLog<W>) -> Self {
        Self {
            config,
            store,
            submitter,
            log,
            entries: Vec::new(),
            stats: SweepStats::default(),
            log_failures: 0,
        }
    }

    /// Sequential sweep at `now` over every vesting account of the program.
    /// Accounts of other mints are recorded as skipped. Per-account failures
    /// are recorded and the sweep moves on.
    ///
    /// Fails when the accounts cannot be listed, or after the last account
    /// when any run-log record could not be written. `entries` and `stats`
    /// still hold the full run in that case.
    pub fn sweep(&mut self, now: u64) -> Result<SweepStats> {
        let accounts = load_vesting_accounts(self.store, &self.config.program_id)?;
        self.entries.clear();
        self.log_failures = 0;
        self.stats = SweepStats {
            total_accounts: accounts.len(),
            ..SweepStats::default()
        };

        msg!(
            "Sweeping {} vesting accounts for mint {}",
            accounts.len(),
            self.config.mint
        );
        let started = self.log.append(&RunRecord::Started {
            started_at: now,
            program_id: self.config.program_id.to_string(),
            mint: self.config.mint.to_string(),
            total_accounts: accounts.len(),
        });
        self.note_log_result(started);

        for (i, (address, account)) in accounts.iter().enumerate() {
            let entry = if account.mint == self.config.mint {
                self.distribute_one(i + 1, address, account, now)
            } else {
                msg!("[{}] {}: mint {} is out of scope", i + 1, address, account.mint);
                AccountEntry {
                    index: i + 1,
                    address: address.to_string(),
                    report: None,
                    outcome: Outcome::Skipped {
                        reason: "other mint".to_string(),
                    },
                }
            };
            self.stats.count(&entry.outcome);
            let written = self.log.append(&RunRecord::Account(&entry));
            self.note_log_result(written);
            self.entries.push(entry);
        }

        msg!(
            "Sweep done: {} processed, {} successful, {} failed, {} skipped, {} distributed",
            self.stats.processed,
            self.stats.successful,
            self.stats.failed,
            self.stats.skipped,
            format_ui_amount(self.stats.distributed, self.config.token_decimals)
        );
        let summary = self.log.append(&RunRecord::Summary(&self.stats));
        self.note_log_result(summary);

        if self.log_failures > 0 {
            msg!("{} run log records were not written", self.log_failures);
            return err!(DistributorError::RunLogUnavailable);
        }
        Ok(self.stats.clone())
    }

    /// Per-account records of the last sweep.
    pub fn entries(&self) -> &[AccountEntry] {
        &self.entries
    }

    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }

    fn note_log_result(&mut self, result: Result<()>) {
        if result.is_err() {
            self.log_failures += 1;
        }
    }

    fn distribute_one(
        &self,
        index: usize,
        address: &Pubkey,
        account: &VestingAccount,
        now: u64,
    ) -> AccountEntry {
        let mut entry = AccountEntry {
            index,
            address: address.to_string(),
            report: None,
            outcome: Outcome::Skipped {
                reason: "nothing to claim".to_string(),
            },
        };

        let report = match describe_account(address, account, now, self.config.token_decimals) {
            Ok(report) => report,
            Err(err) => {
                msg!("[{}] {}: unreadable state: {}", index, address, err);
                entry.outcome = Outcome::Failed {
                    error: err.to_string(),
                    attempts: 0,
                };
                return entry;
            }
        };
        let claimable = report.claimable;
        entry.report = Some(report);

        if claimable == 0 {
            msg!("[{}] {}: nothing to claim", index, address);
            return entry;
        }

        let addresses = ClaimAddresses::for_account(*address, account);
        let instruction = admin_distribute_unlocked(self.config, &addresses);
        let (result, attempts) = self.submit_with_retry(&instruction);

        entry.outcome = match result {
            Ok(signature) => {
                msg!(
                    "[{}] {}: distributed {} to {} ({})",
                    index,
                    address,
                    format_ui_amount(claimable, self.config.token_decimals),
                    account.authority,
                    signature
                );
                Outcome::Distributed {
                    signature,
                    amount: claimable,
                    attempts,
                }
            }
            Err(err) if classify(&err) == FailureKind::NothingToClaim => {
                msg!("[{}] {}: already claimed", index, address);
                Outcome::Skipped {
                    reason: "claimed concurrently".to_string(),
                }
            }
            Err(err) => {
                msg!("[{}] {}: failed after {} attempts: {}", index, address, attempts, err);
                Outcome::Failed {
                    error: err.to_string(),
                    attempts,
                }
            }
        };
        entry
    }

    /// Transport failures are retried until `max_attempts`; everything
    /// else returns on the first answer.
    fn submit_with_retry(&self, instruction: &Instruction) -> (Result<String>, u32) {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.submitter.submit(instruction) {
                Err(err)
                    if classify(&err) == FailureKind::Transport
                        && attempts < self.config.max_attempts =>
                {
                    msg!("Attempt {} failed, retrying: {}", attempts, err);
                }
                result => return (result, attempts),
            }
        }
    }

    pub fn into_log(self) -> RunLog<W> {
        self.log
    }
}

/// One sweep at the wall clock, logged to a fresh file under `log_dir`.
pub fn run<S: AccountStore, C: ClaimSubmitter>(
    config: &DistributorConfig,
    store: &S,
    submitter: &C,
) -> Result<SweepStats> {
    let now = unix_now();
    let (log, path) = RunLog::<File>::create(&config.log_dir, now)?;
    msg!("Run log: {}", path.display());
    Distributor::new(config, store, submitter, log).sweep(now)
}
