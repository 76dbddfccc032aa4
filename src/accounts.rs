//! Dispatch of raw program accounts to their record types.

use borsh::BorshDeserialize;
use log::debug;
use solana_sdk::pubkey::Pubkey;

use crate::{
    codec::from_bytes,
    error::CodecError,
    state::{AccountType, JoinData, LaunchData, UserData},
};

/// Raw account as returned by an RPC node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl KeyedAccount {
    pub fn new(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
        Self { key, owner, data }
    }
}

/// Records with a registered decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramAccount {
    Launch(LaunchData),
    User(UserData),
    Join(JoinData),
}

impl ProgramAccount {
    pub fn account_type(&self) -> AccountType {
        match self {
            ProgramAccount::Launch(_) => AccountType::Launch,
            ProgramAccount::User(_) => AccountType::User,
            ProgramAccount::Join(_) => AccountType::Join,
        }
    }
}

/// A record type tied to its leading discriminator.
pub trait ProgramAccountData: BorshDeserialize {
    const ACCOUNT_TYPE: AccountType;
}

impl ProgramAccountData for LaunchData {
    const ACCOUNT_TYPE: AccountType = AccountType::Launch;
}

impl ProgramAccountData for UserData {
    const ACCOUNT_TYPE: AccountType = AccountType::User;
}

impl ProgramAccountData for JoinData {
    const ACCOUNT_TYPE: AccountType = AccountType::Join;
}

pub fn account_type_of(data: &[u8]) -> Result<AccountType, CodecError> {
    let tag = *data.first().ok_or(CodecError::BufferTooShort {
        needed: 1,
        remaining: 0,
    })?;
    AccountType::try_from(tag)
}

/// Decodes any registered record, picking the type from the first byte. Bytes past
/// the record (allocation slack) are ignored.
pub fn decode_program_account(data: &[u8]) -> Result<ProgramAccount, CodecError> {
    match account_type_of(data)? {
        AccountType::Launch => Ok(ProgramAccount::Launch(from_bytes(data)?.0)),
        AccountType::User => Ok(ProgramAccount::User(from_bytes(data)?.0)),
        AccountType::Join => Ok(ProgramAccount::Join(from_bytes(data)?.0)),
        account_type => Err(CodecError::UnsupportedAccountType { account_type }),
    }
}

/// Decodes `T` after checking the discriminator names it.
pub fn decode_account<T: ProgramAccountData>(data: &[u8]) -> Result<T, CodecError> {
    let found = account_type_of(data)?;
    if found != T::ACCOUNT_TYPE {
        return Err(CodecError::UnexpectedAccountType {
            expected: T::ACCOUNT_TYPE,
            found,
        });
    }
    Ok(from_bytes(data)?.0)
}

/// Which discriminator bytes a scan keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccountFilter {
    #[default]
    All,
    Only(Vec<u8>),
    Excluding(Vec<u8>),
}

impl AccountFilter {
    pub fn all() -> Self {
        AccountFilter::All
    }

    pub fn only(account_types: &[AccountType]) -> Self {
        AccountFilter::Only(account_types.iter().map(|t| u8::from(*t)).collect())
    }

    pub fn excluding(tags: &[u8]) -> Self {
        AccountFilter::Excluding(tags.to_vec())
    }

    pub fn accepts(&self, tag: u8) -> bool {
        match self {
            AccountFilter::All => true,
            AccountFilter::Only(tags) => tags.contains(&tag),
            AccountFilter::Excluding(tags) => !tags.contains(&tag),
        }
    }
}

/// Decodes every account the filter accepts. Accounts that are filtered out or
/// fail to decode are skipped and logged at debug level.
pub fn scan_program_accounts<'a>(
    accounts: impl IntoIterator<Item = &'a KeyedAccount>,
    filter: &AccountFilter,
) -> Vec<(Pubkey, ProgramAccount)> {
    let mut decoded = Vec::new();

    for account in accounts {
        let Some(&tag) = account.data.first() else {
            debug!("Skipping empty account {}", account.key);
            continue;
        };
        if !filter.accepts(tag) {
            debug!("Skipping account {} with discriminator {}", account.key, tag);
            continue;
        }

        match decode_program_account(&account.data) {
            Ok(record) => decoded.push((account.key, record)),
            Err(err) => debug!("Skipping account {}: {}", account.key, err),
        }
    }

    decoded
}
