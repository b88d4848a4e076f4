//! Builders for the program's instructions, with every address derived.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, InstructionData};
use team_vesting::utils::pda::{associated_token_address, vesting_address};
use team_vesting::utils::schedule::build_schedule;
use team_vesting::{accounts, instruction, VestingAccount, WalletType};

use crate::config::DistributorConfig;

/// Addresses a claim touches for one vesting account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimAddresses {
    pub vesting_account: Pubkey,
    pub beneficiary: Pubkey,
    pub custody: Pubkey,
    pub destination: Pubkey,
}

impl ClaimAddresses {
    /// The vesting PDA signs for custody, so it is also the custody owner.
    pub fn derive(beneficiary: Pubkey, mint: &Pubkey, program_id: &Pubkey) -> Self {
        let (vesting_account, _) = vesting_address(&beneficiary, mint, program_id);
        Self {
            vesting_account,
            beneficiary,
            custody: associated_token_address(&vesting_account, mint),
            destination: associated_token_address(&beneficiary, mint),
        }
    }

    pub fn for_account(address: Pubkey, account: &VestingAccount) -> Self {
        Self {
            vesting_account: address,
            beneficiary: account.authority,
            custody: associated_token_address(&address, &account.mint),
            destination: associated_token_address(&account.authority, &account.mint),
        }
    }
}

/// Vesting for `beneficiary` following the wallet class plan from `start_ts`.
pub fn initialize_vesting(
    config: &DistributorConfig,
    beneficiary: Pubkey,
    wallet_type: WalletType,
    total_amount: u64,
    start_ts: u64,
) -> Result<Instruction> {
    let schedule = build_schedule(wallet_type, total_amount, start_ts)?;
    let addresses = ClaimAddresses::derive(beneficiary, &config.mint, &config.program_id);

    Ok(Instruction {
        program_id: config.program_id,
        accounts: accounts::InitializeVesting {
            admin: config.admin,
            admin_token_account: associated_token_address(&config.admin, &config.mint),
            beneficiary,
            mint: config.mint,
            vesting_account: addresses.vesting_account,
            vesting_token_account: addresses.custody,
            system_program: system_program::ID,
            token_program: anchor_spl::token::ID,
            associated_token_program: anchor_spl::associated_token::ID,
        }
        .to_account_metas(None),
        data: instruction::InitializeVesting {
            wallet_type,
            total_amount,
            schedule,
        }
        .data(),
    })
}

/// Self-service claim, signed by the beneficiary.
pub fn claim_unlocked(config: &DistributorConfig, beneficiary: Pubkey) -> Instruction {
    let addresses = ClaimAddresses::derive(beneficiary, &config.mint, &config.program_id);
    Instruction {
        program_id: config.program_id,
        accounts: accounts::ClaimUnlocked {
            vesting_account: addresses.vesting_account,
            authority: beneficiary,
            vesting_token_account: addresses.custody,
            destination_token_account: addresses.destination,
            vesting_signer: addresses.vesting_account,
            token_program: anchor_spl::token::ID,
        }
        .to_account_metas(None),
        data: instruction::ClaimUnlocked {}.data(),
    }
}

/// Admin-signed payout to the beneficiary's own token account.
pub fn admin_distribute_unlocked(
    config: &DistributorConfig,
    addresses: &ClaimAddresses,
) -> Instruction {
    Instruction {
        program_id: config.program_id,
        accounts: accounts::AdminDistribute {
            admin: config.admin,
            vesting_account: addresses.vesting_account,
            authority: addresses.beneficiary,
            vesting_token_account: addresses.custody,
            destination_token_account: addresses.destination,
            vesting_signer: addresses.vesting_account,
            token_program: anchor_spl::token::ID,
        }
        .to_account_metas(None),
        data: instruction::AdminDistributeUnlocked {}.data(),
    }
}
