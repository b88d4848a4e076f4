//! Runs instructions through the program's `entry` with hand-built accounts.
//!
//! Off-chain there is no runtime behind CPIs or the clock sysvar, so these
//! runs stop at the first check that fails, or at `Clock::get` when every
//! account check passes.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_spl::token::spl_token;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::{Account as TokenState, AccountState};

use crate::state::VestingAccount;
use crate::utils::pda;

pub struct TestAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub is_signer: bool,
    pub is_writable: bool,
    pub executable: bool,
}

impl TestAccount {
    pub fn vesting(key: Pubkey, vesting: &VestingAccount) -> Self {
        let mut data = Vec::new();
        vesting
            .try_serialize(&mut data)
            .expect("vesting account serializes");
        Self {
            key,
            owner: crate::ID,
            lamports: 1_000_000,
            data,
            is_signer: false,
            is_writable: true,
            executable: false,
        }
    }

    pub fn token(key: Pubkey, mint: Pubkey, owner: Pubkey, amount: u64) -> Self {
        let mut data = vec![0u8; TokenState::LEN];
        TokenState::pack(
            TokenState {
                mint,
                owner,
                amount,
                state: AccountState::Initialized,
                ..TokenState::default()
            },
            &mut data,
        )
        .expect("token account packs");
        Self {
            key,
            owner: spl_token::ID,
            lamports: 1_000_000,
            data,
            is_signer: false,
            is_writable: true,
            executable: false,
        }
    }

    pub fn wallet(key: Pubkey, is_signer: bool) -> Self {
        Self {
            key,
            owner: anchor_lang::system_program::ID,
            lamports: 1_000_000,
            data: Vec::new(),
            is_signer,
            is_writable: false,
            executable: false,
        }
    }

    pub fn program(key: Pubkey) -> Self {
        Self {
            key,
            owner: Pubkey::default(),
            lamports: 1,
            data: Vec::new(),
            is_signer: false,
            is_writable: false,
            executable: true,
        }
    }
}

/// Vesting PDA, custody and beneficiary token accounts for `vesting`, all at
/// their derived addresses. Custody holds the full total.
pub struct Position {
    pub signer: Pubkey,
    pub vesting: TestAccount,
    pub custody: TestAccount,
    pub destination: TestAccount,
}

impl Position {
    pub fn new(vesting: &VestingAccount) -> Self {
        let signer = pda::vesting_address(&vesting.authority, &vesting.mint, &crate::ID).0;
        Self {
            signer,
            vesting: TestAccount::vesting(signer, vesting),
            custody: TestAccount::token(
                pda::associated_token_address(&signer, &vesting.mint),
                vesting.mint,
                signer,
                vesting.total_amount,
            ),
            destination: TestAccount::token(
                pda::associated_token_address(&vesting.authority, &vesting.mint),
                vesting.mint,
                vesting.authority,
                0,
            ),
        }
    }
}

/// Dispatches `data` through `entry`. Accounts are leaked so the returned
/// infos can be inspected after the run.
pub fn execute(
    accounts: Vec<TestAccount>,
    data: &[u8],
) -> (ProgramResult, &'static [AccountInfo<'static>]) {
    let accounts: &'static mut [TestAccount] = Box::leak(accounts.into_boxed_slice());
    let infos: Vec<AccountInfo<'static>> = accounts
        .iter_mut()
        .map(|a| {
            AccountInfo::new(
                &a.key,
                a.is_signer,
                a.is_writable,
                &mut a.lamports,
                &mut a.data,
                &a.owner,
                a.executable,
                0,
            )
        })
        .collect();
    let infos: &'static [AccountInfo<'static>] = Box::leak(infos.into_boxed_slice());
    (crate::entry(&crate::ID, infos, data), infos)
}

pub fn stored_vesting(info: &AccountInfo) -> VestingAccount {
    let data = info.try_borrow_data().expect("vesting data borrows");
    let mut bytes: &[u8] = &data;
    VestingAccount::try_deserialize(&mut bytes).expect("vesting account decodes")
}

pub fn custom(code: impl Into<u32>) -> ProgramError {
    ProgramError::Custom(code.into())
}
