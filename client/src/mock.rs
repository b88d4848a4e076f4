//! In-memory ledger for sweep tests. Claims go through the program's own
//! account checks and bookkeeping and commit atomically, like a transaction.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::Discriminator;
use team_vesting::instructions::admin_distribute_unlocked::authorize_admin_distribution;
use team_vesting::instructions::claim_unlocked::{
    payable_amount, verify_claim_accounts, ClaimAccounts,
};
use team_vesting::utils::pda::{associated_token_address, vesting_address};
use team_vesting::{instruction, VestingAccount, VestingScheduleEntry, WalletType};

use crate::error::DistributorError;
use crate::ledger::{AccountStore, ClaimSubmitter};

#[derive(Clone, Copy, Debug)]
pub struct TokenState {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

pub struct SimulatedLedger {
    pub program_id: Pubkey,
    pub mint: Pubkey,
    now: Cell<u64>,
    vestings: RefCell<BTreeMap<Pubkey, VestingAccount>>,
    raw: RefCell<Vec<(Pubkey, Vec<u8>)>>,
    tokens: RefCell<HashMap<Pubkey, TokenState>>,
    transient: RefCell<HashMap<Pubkey, u32>>,
    racing: RefCell<Vec<Pubkey>>,
    listed_twice: Cell<bool>,
    submissions: Cell<usize>,
}

impl SimulatedLedger {
    pub fn new(now: u64) -> Self {
        Self {
            program_id: team_vesting::ID,
            mint: Pubkey::new_unique(),
            now: Cell::new(now),
            vestings: RefCell::default(),
            raw: RefCell::default(),
            tokens: RefCell::default(),
            transient: RefCell::default(),
            racing: RefCell::default(),
            listed_twice: Cell::new(false),
            submissions: Cell::new(0),
        }
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn set_now(&self, now: u64) {
        self.now.set(now);
    }

    /// Funded position for a fresh beneficiary of the ledger's mint.
    pub fn add_vesting(&self, schedule: Vec<VestingScheduleEntry>) -> Pubkey {
        self.add_vesting_for_mint(self.mint, schedule)
    }

    pub fn add_foreign_mint_vesting(&self, schedule: Vec<VestingScheduleEntry>) -> Pubkey {
        self.add_vesting_for_mint(Pubkey::new_unique(), schedule)
    }

    fn add_vesting_for_mint(&self, mint: Pubkey, schedule: Vec<VestingScheduleEntry>) -> Pubkey {
        let beneficiary = Pubkey::new_unique();
        let (address, bump) = vesting_address(&beneficiary, &mint, &self.program_id);
        let total_amount = schedule.iter().map(|e| e.amount).sum();

        let mut tokens = self.tokens.borrow_mut();
        tokens.insert(
            associated_token_address(&address, &mint),
            TokenState {
                mint,
                owner: address,
                amount: total_amount,
            },
        );
        tokens.insert(
            associated_token_address(&beneficiary, &mint),
            TokenState {
                mint,
                owner: beneficiary,
                amount: 0,
            },
        );
        self.vestings.borrow_mut().insert(
            address,
            VestingAccount {
                authority: beneficiary,
                mint,
                total_amount,
                claimed_amount: 0,
                schedule,
                wallet_type: WalletType::Presale2,
                bump,
            },
        );
        address
    }

    pub fn add_raw(&self, address: Pubkey, data: Vec<u8>) {
        self.raw.borrow_mut().push((address, data));
    }

    pub fn mark_claimed(&self, address: &Pubkey, amount: u64) {
        if let Some(v) = self.vestings.borrow_mut().get_mut(address) {
            v.claimed_amount = amount;
        }
    }

    /// The next `count` submissions for `address` fail in transit.
    pub fn fail_next(&self, address: &Pubkey, count: u32) {
        self.transient.borrow_mut().insert(*address, count);
    }

    /// The beneficiary claims everything right before the next submission
    /// for `address` lands.
    pub fn claim_before_next_submission(&self, address: &Pubkey) {
        self.racing.borrow_mut().push(*address);
    }

    pub fn list_twice(&self) {
        self.listed_twice.set(true);
    }

    pub fn submissions(&self) -> usize {
        self.submissions.get()
    }

    pub fn vesting(&self, address: &Pubkey) -> VestingAccount {
        self.vestings.borrow()[address].clone()
    }

    pub fn beneficiary_balance(&self, address: &Pubkey) -> u64 {
        let v = self.vesting(address);
        self.tokens.borrow()[&associated_token_address(&v.authority, &v.mint)].amount
    }

    fn serialized(account: &VestingAccount) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        account.try_serialize(&mut data)?;
        Ok(data)
    }

    fn race(&self, address: &Pubkey) -> Result<()> {
        let mut racing = self.racing.borrow_mut();
        if let Some(pos) = racing.iter().position(|a| a == address) {
            racing.remove(pos);
            let mut vestings = self.vestings.borrow_mut();
            let vesting = vestings
                .get_mut(address)
                .ok_or(ErrorCode::AccountNotInitialized)?;
            let amount = vesting.claimable_at(self.now())?;
            vesting.record_claim(amount)?;
        }
        Ok(())
    }

    fn token(&self, address: &Pubkey) -> Result<TokenState> {
        self.tokens
            .borrow()
            .get(address)
            .copied()
            .ok_or_else(|| ErrorCode::AccountNotInitialized.into())
    }

    fn apply_admin_distribution(&self, ix: &Instruction) -> Result<()> {
        require!(ix.accounts.len() == 7, ErrorCode::AccountNotEnoughKeys);
        let key = |i: usize| ix.accounts[i].pubkey;
        let (admin, vesting_key, authority, custody_key, destination_key, signer) =
            (key(0), key(1), key(2), key(3), key(4), key(5));
        require!(ix.accounts[0].is_signer, ErrorCode::AccountNotSigner);

        let mut vesting = self
            .vestings
            .borrow()
            .get(&vesting_key)
            .cloned()
            .ok_or(ErrorCode::AccountNotInitialized)?;
        let mut custody = self.token(&custody_key)?;
        let mut destination = self.token(&destination_key)?;

        let accounts = ClaimAccounts {
            custody: custody_key,
            custody_mint: custody.mint,
            custody_owner: custody.owner,
            destination_mint: destination.mint,
            vesting_signer: signer,
        };
        verify_claim_accounts(&vesting, &accounts, &self.program_id)?;
        authorize_admin_distribution(&vesting, &admin, &authority, &destination.owner)?;
        let amount = payable_amount(&vesting, self.now())?;

        custody.amount = custody
            .amount
            .checked_sub(amount)
            .ok_or(ProgramError::InsufficientFunds)?;
        destination.amount = destination
            .amount
            .checked_add(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        vesting.record_claim(amount)?;

        let mut tokens = self.tokens.borrow_mut();
        tokens.insert(custody_key, custody);
        tokens.insert(destination_key, destination);
        self.vestings.borrow_mut().insert(vesting_key, vesting);
        Ok(())
    }
}

impl AccountStore for SimulatedLedger {
    fn get(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        if let Some(account) = self.vestings.borrow().get(address) {
            return Self::serialized(account).map(Some);
        }
        Ok(self
            .raw
            .borrow()
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, data)| data.clone()))
    }

    fn program_accounts(&self, program_id: &Pubkey) -> Result<Vec<(Pubkey, Vec<u8>)>> {
        if *program_id != self.program_id {
            return Ok(Vec::new());
        }
        let mut listed = Vec::new();
        for (address, account) in self.vestings.borrow().iter() {
            listed.push((*address, Self::serialized(account)?));
        }
        listed.extend(self.raw.borrow().iter().cloned());
        if self.listed_twice.get() {
            listed.extend(listed.clone());
        }
        Ok(listed)
    }
}

impl ClaimSubmitter for SimulatedLedger {
    fn submit(&self, ix: &Instruction) -> Result<String> {
        let n = self.submissions.get() + 1;
        self.submissions.set(n);

        if ix.program_id != self.program_id {
            return Err(ProgramError::IncorrectProgramId.into());
        }
        if ix.data != instruction::AdminDistributeUnlocked::DISCRIMINATOR {
            return Err(ErrorCode::InstructionFallbackNotFound.into());
        }
        let vesting_key = ix
            .accounts
            .get(1)
            .map(|m| m.pubkey)
            .ok_or(ErrorCode::AccountNotEnoughKeys)?;

        if let Some(left) = self.transient.borrow_mut().get_mut(&vesting_key) {
            if *left > 0 {
                *left -= 1;
                return err!(DistributorError::SubmissionFailed);
            }
        }

        self.race(&vesting_key)?;
        self.apply_admin_distribution(ix)?;
        Ok(format!("sim-{n}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use team_vesting::VestingError;

    fn admin_ix(ledger: &SimulatedLedger, address: Pubkey) -> Instruction {
        let config =
            crate::config::DistributorConfig::new(team_vesting::ADMIN_PUBKEY, ledger.mint);
        let v = ledger.vesting(&address);
        crate::instructions::admin_distribute_unlocked(
            &config,
            &crate::instructions::ClaimAddresses::for_account(address, &v),
        )
    }

    #[test]
    fn failed_claim_changes_nothing() {
        let ledger = SimulatedLedger::new(10);
        let a = ledger.add_vesting(vec![VestingScheduleEntry {
            release_time: 20,
            amount: 5,
        }]);
        let ix = admin_ix(&ledger, a);
        assert_eq!(
            ledger.submit(&ix).unwrap_err(),
            VestingError::NothingToClaim.into()
        );
        assert_eq!(ledger.vesting(&a).claimed_amount, 0);

        ledger.set_now(20);
        assert!(ledger.submit(&ix).is_ok());
        assert_eq!(ledger.beneficiary_balance(&a), 5);
    }

    #[test]
    fn redirected_destination_is_rejected() {
        let ledger = SimulatedLedger::new(10);
        let a = ledger.add_vesting(vec![VestingScheduleEntry {
            release_time: 0,
            amount: 5,
        }]);
        let b = ledger.add_vesting(vec![VestingScheduleEntry {
            release_time: 0,
            amount: 5,
        }]);
        let mut ix = admin_ix(&ledger, a);
        ix.accounts[4] = admin_ix(&ledger, b).accounts[4].clone();
        assert_eq!(
            ledger.submit(&ix).unwrap_err(),
            VestingError::InvalidAuthority.into()
        );

        let mut ix = admin_ix(&ledger, a);
        ix.accounts[3] = admin_ix(&ledger, b).accounts[3].clone();
        assert_eq!(
            ledger.submit(&ix).unwrap_err(),
            VestingError::InvalidPda.into()
        );
        assert_eq!(ledger.vesting(&a).claimed_amount, 0);
        assert_eq!(ledger.vesting(&b).claimed_amount, 0);
    }

    #[test]
    fn stored_accounts_decode() {
        let ledger = SimulatedLedger::new(0);
        let a = ledger.add_vesting(vec![VestingScheduleEntry {
            release_time: 0,
            amount: 5,
        }]);
        let fetched = crate::ledger::fetch_vesting_account(&ledger, &a).unwrap();
        assert_eq!(fetched, Some(ledger.vesting(&a)));
        assert_eq!(
            crate::ledger::fetch_vesting_account(&ledger, &Pubkey::new_unique()).unwrap(),
            None
        );
    }
}
