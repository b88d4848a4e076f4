use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anchor_lang::prelude::*;
use serde::Serialize;

use crate::error::DistributorError;
use crate::sweep::{AccountEntry, SweepStats};

/// One JSON line of the run log.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunRecord<'a> {
    Started {
        started_at: u64,
        program_id: String,
        mint: String,
        total_accounts: usize,
    },
    Account(&'a AccountEntry),
    Summary(&'a SweepStats),
}

/// Append-only JSON-lines sink. Each record is flushed before the next
/// account is touched so an aborted run leaves a readable log.
pub struct RunLog<W: Write> {
    out: W,
}

impl<W: Write> RunLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn append(&mut self, record: &RunRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| {
            msg!("Run log record not serializable: {}", e);
            error!(DistributorError::RunLogUnavailable)
        })?;
        writeln!(self.out, "{line}")
            .and_then(|_| self.out.flush())
            .map_err(|e| {
                msg!("Run log write failed: {}", e);
                error!(DistributorError::RunLogUnavailable)
            })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl RunLog<File> {
    /// Opens `<dir>/batch-release-<started_at>.log`, creating the directory.
    pub fn create(dir: &Path, started_at: u64) -> Result<(Self, PathBuf)> {
        let path = dir.join(format!("batch-release-{started_at}.log"));
        fs::create_dir_all(dir)
            .and_then(|_| OpenOptions::new().create(true).append(true).open(&path))
            .map(|file| (Self::new(file), path.clone()))
            .map_err(|e| {
                msg!("Cannot open run log {}: {}", path.display(), e);
                error!(DistributorError::RunLogUnavailable)
            })
    }
}
