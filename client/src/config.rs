use std::path::PathBuf;
use std::str::FromStr;

use anchor_lang::prelude::*;

use crate::error::DistributorError;

pub const DEFAULT_TOKEN_DECIMALS: u8 = 9;
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Everything one distributor run needs. Built once per run and passed
/// down; nothing is cached process-wide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributorConfig {
    pub program_id: Pubkey,
    /// Admin signer for `admin_distribute_unlocked`.
    pub admin: Pubkey,
    /// Only vesting accounts of this mint are swept.
    pub mint: Pubkey,
    /// Used for UI amounts in reports only.
    pub token_decimals: u8,
    pub log_dir: PathBuf,
    /// Submissions per account, counting the first one. Transport failures only.
    pub max_attempts: u32,
}

impl DistributorConfig {
    pub fn new(admin: Pubkey, mint: Pubkey) -> Self {
        Self {
            program_id: team_vesting::ID,
            admin,
            mint,
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Reads `ADMIN_PUBKEY`, `MINT_ADDRESS` (required) and `PROGRAM_ID`,
    /// `TOKEN_DECIMALS`, `LOG_DIR`, `MAX_ATTEMPTS` (optional).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin = parse_pubkey("ADMIN_PUBKEY", required(&lookup, "ADMIN_PUBKEY")?)?;
        let mint = parse_pubkey("MINT_ADDRESS", required(&lookup, "MINT_ADDRESS")?)?;
        let mut config = Self::new(admin, mint);

        if let Some(raw) = lookup("PROGRAM_ID") {
            config.program_id = parse_pubkey("PROGRAM_ID", raw)?;
        } else {
            msg!("PROGRAM_ID not set, using {}", config.program_id);
        }
        if let Some(raw) = lookup("TOKEN_DECIMALS") {
            config.token_decimals = parse_number("TOKEN_DECIMALS", &raw)?;
        }
        if let Some(raw) = lookup("LOG_DIR") {
            config.log_dir = PathBuf::from(raw);
        }
        if let Some(raw) = lookup("MAX_ATTEMPTS") {
            config.max_attempts = parse_number("MAX_ATTEMPTS", &raw)?;
            require!(config.max_attempts > 0, DistributorError::InvalidConfig);
        }

        Ok(config)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            msg!("{} must be set", key);
            err!(DistributorError::MissingConfig)
        }
    }
}

fn parse_pubkey(key: &str, raw: String) -> Result<Pubkey> {
    Pubkey::from_str(raw.trim()).map_err(|_| {
        msg!("{} is not a valid public key: {}", key, raw);
        error!(DistributorError::InvalidConfig)
    })
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        msg!("{} is not a valid number: {}", key, raw);
        error!(DistributorError::InvalidConfig)
    })
}
