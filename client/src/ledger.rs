use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use team_vesting::VestingAccount;

/// Read access to the ledger's account database. Implementations report
/// unreachable storage as `DistributorError::AccountFetchFailed`.
pub trait AccountStore {
    /// Raw data of one account, `None` when it does not exist.
    fn get(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;

    /// Every account owned by `program_id` with its raw data.
    fn program_accounts(&self, program_id: &Pubkey) -> Result<Vec<(Pubkey, Vec<u8>)>>;
}

/// Signs, submits and confirms one single-instruction transaction.
///
/// Implementations return the transaction signature once confirmed. Program
/// rejections surface as the program's error; delivery problems as
/// `DistributorError::SubmissionFailed` or `ConfirmationTimeout`.
pub trait ClaimSubmitter {
    fn submit(&self, instruction: &Instruction) -> Result<String>;
}

/// Decodes an Anchor account; checks the discriminator.
pub fn decode_vesting_account(data: &[u8]) -> Result<VestingAccount> {
    let mut bytes = data;
    VestingAccount::try_deserialize(&mut bytes)
}

pub fn fetch_vesting_account<S: AccountStore>(
    store: &S,
    address: &Pubkey,
) -> Result<Option<VestingAccount>> {
    store
        .get(address)?
        .map(|data| decode_vesting_account(&data))
        .transpose()
}

/// Every vesting account owned by the program, one entry per address,
/// ordered by address. Undecodable accounts are logged and left out.
pub fn load_vesting_accounts<S: AccountStore>(
    store: &S,
    program_id: &Pubkey,
) -> Result<Vec<(Pubkey, VestingAccount)>> {
    let mut accounts = BTreeMap::new();
    for (address, data) in store.program_accounts(program_id)? {
        match decode_vesting_account(&data) {
            Ok(account) => {
                accounts.insert(address, account);
            }
            Err(err) => msg!("Ignoring {}: not a vesting account ({})", address, err),
        }
    }
    Ok(accounts.into_iter().collect())
}
