use std::io;

use solana_sdk::program_error::ProgramError;
use thiserror::Error;

use crate::state::AccountType;

/// Failures while turning bytes into records or records into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Buffer too short: need {needed} bytes, {remaining} remaining")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("Length prefix {declared} overruns the {remaining} remaining bytes")]
    LengthOverrun { declared: usize, remaining: usize },

    #[error("Malformed record ({kind:?}): {message}")]
    Malformed { kind: io::ErrorKind, message: String },

    #[error("Invalid token account state: {0}")]
    InvalidTokenState(ProgramError),

    #[error("Value {value} for `{field}` exceeds its wire width (max {max})")]
    ValueOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("Unknown account type discriminator {tag}")]
    UnknownAccountType { tag: u8 },

    #[error("Expected a {expected:?} account, found {found:?}")]
    UnexpectedAccountType {
        expected: AccountType,
        found: AccountType,
    },

    #[error("No decoder registered for {account_type:?} accounts")]
    UnsupportedAccountType { account_type: AccountType },

    #[error("{remaining} trailing bytes after the record")]
    TrailingBytes { remaining: usize },
}

impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        CodecError::Malformed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Program address derivation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("Too many seeds: {count} (max {max})", max = crate::pda::MAX_USER_SEEDS)]
    TooManySeeds { count: usize },

    #[error("Seed {index} is {len} bytes long (max {max})", max = solana_sdk::pubkey::MAX_SEED_LEN)]
    SeedTooLong { index: usize, len: usize },

    #[error("No bump seed in 0..=255 yields an off-curve address")]
    NoViableBump,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    #[error("Fee of {bps} basis points is above 100%")]
    FeeOutOfRange { bps: u64 },

    #[error("Swap output does not fit in a u64")]
    OutputOverflow,

    #[error("Cannot scale by {decimals} decimals")]
    InvalidDecimals { decimals: u8 },
}
