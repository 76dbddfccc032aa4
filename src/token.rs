//! SPL token layouts read by the launch pages, plus transfer-fee and transfer-hook
//! metadata for Token-2022 mints.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{program_pack::Pack, pubkey::Pubkey};
use spl_token_2022::{
    extension::{
        BaseStateWithExtensions, StateWithExtensions,
        transfer_fee::{TransferFee, TransferFeeConfig},
    },
    state::{Account, AccountState, Mint},
};

use crate::{
    codec::{FixedLen, from_bytes},
    error::CodecError,
    math,
};

/// Accounts owned by either token program can back a launch's mint or vaults.
pub fn is_token_program(owner: &Pubkey) -> bool {
    *owner == spl_token::ID || *owner == spl_token_2022::ID
}

/// Mint state shared by SPL Token and Token-2022, with the transfer-fee extension
/// when the mint carries one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token22MintAccount {
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<Pubkey>,
    pub transfer_fee_config: Option<TransferFeeConfig>,
}

impl Token22MintAccount {
    /// Reads an initialized mint. Extension data after the base state is optional.
    pub fn unpack(data: &[u8]) -> Result<Self, CodecError> {
        let state =
            StateWithExtensions::<Mint>::unpack(data).map_err(CodecError::InvalidTokenState)?;
        let transfer_fee_config = state.get_extension::<TransferFeeConfig>().ok().copied();
        let base = state.base;

        Ok(Self {
            mint_authority: base.mint_authority.into(),
            supply: base.supply,
            decimals: base.decimals,
            is_initialized: base.is_initialized,
            freeze_authority: base.freeze_authority.into(),
            transfer_fee_config,
        })
    }

    pub fn transfer_fee(&self, epoch: u64) -> Option<TransferFeeTerms> {
        self.transfer_fee_config
            .as_ref()
            .map(|config| TransferFeeTerms::from_config(config, epoch))
    }
}

impl FixedLen for Token22MintAccount {
    const LEN: usize = Mint::LEN;
}

/// Token account state, read through the Token-2022 parser so both programs' accounts work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenAccount {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub state: AccountState,
    /// Rent-exempt reserve when the account wraps SOL.
    pub is_native: Option<u64>,
    pub delegated_amount: u64,
    pub close_authority: Option<Pubkey>,
}

impl TokenAccount {
    pub fn unpack(data: &[u8]) -> Result<Self, CodecError> {
        let base = StateWithExtensions::<Account>::unpack(data)
            .map_err(CodecError::InvalidTokenState)?
            .base;

        Ok(Self {
            mint: base.mint,
            owner: base.owner,
            amount: base.amount,
            delegate: base.delegate.into(),
            state: base.state,
            is_native: base.is_native.into(),
            delegated_amount: base.delegated_amount,
            close_authority: base.close_authority.into(),
        })
    }

    pub fn is_frozen(&self) -> bool {
        self.state == AccountState::Frozen
    }
}

impl FixedLen for TokenAccount {
    const LEN: usize = Account::LEN;
}

/// One entry of a transfer-hook validation account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ExtraAccountMeta {
    pub discriminator: u8,
    pub address_config: [u8; 32],
    pub is_signer: u8,
    pub is_writable: u8,
}

impl ExtraAccountMeta {
    /// Plain fixed-address entries carry the key itself in `address_config`.
    pub fn fixed_address(&self) -> Option<Pubkey> {
        (self.discriminator == 0).then(|| Pubkey::new_from_array(self.address_config))
    }
}

impl FixedLen for ExtraAccountMeta {
    const LEN: usize = 35;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ExtraAccountMetaHead {
    pub discriminator: u64,
    pub length: u32,
    pub count: u32,
}

impl FixedLen for ExtraAccountMetaHead {
    const LEN: usize = 16;
}

/// A whole transfer-hook validation account: the head followed by `count` metas.
///
/// The metas carry no length prefix of their own, so the list serializes them back to
/// back after the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraAccountMetaList {
    pub head: ExtraAccountMetaHead,
    pub metas: Vec<ExtraAccountMeta>,
}

impl ExtraAccountMetaList {
    pub fn unpack(data: &[u8]) -> Result<Self, CodecError> {
        let (head, consumed) = from_bytes::<ExtraAccountMetaHead>(data)?;
        let declared = head.count as usize;
        let mut rest = &data[consumed..];
        if declared.saturating_mul(ExtraAccountMeta::LEN) > rest.len() {
            return Err(CodecError::LengthOverrun {
                declared,
                remaining: rest.len(),
            });
        }

        let metas = (0..declared)
            .map(|_| ExtraAccountMeta::deserialize(&mut rest))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { head, metas })
    }
}

impl BorshSerialize for ExtraAccountMetaList {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.head.serialize(writer)?;
        for meta in &self.metas {
            meta.serialize(writer)?;
        }
        Ok(())
    }
}

/// The transfer fee a Token-2022 mint charges in a given epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferFeeTerms {
    pub basis_points: u16,
    pub maximum_fee: u64,
}

impl TransferFeeTerms {
    pub fn new(basis_points: u16, maximum_fee: u64) -> Self {
        Self {
            basis_points,
            maximum_fee,
        }
    }

    /// Picks whichever of the older/newer fee is active at `epoch`.
    pub fn from_config(config: &TransferFeeConfig, epoch: u64) -> Self {
        Self::from(config.get_epoch_fee(epoch))
    }

    pub fn fee_for(&self, amount: u64) -> u64 {
        math::transfer_fee(amount, self)
    }
}

impl From<&TransferFee> for TransferFeeTerms {
    fn from(fee: &TransferFee) -> Self {
        Self {
            basis_points: u16::from(fee.transfer_fee_basis_points),
            maximum_fee: u64::from(fee.maximum_fee),
        }
    }
}

/// Transfer-fee terms of a raw mint account, if it is a Token-2022 mint with the
/// extension. Classic SPL mints and unparsable data carry no fee.
pub fn mint_transfer_fee(
    mint_account_data: &[u8],
    mint_owner: &Pubkey,
    epoch: u64,
) -> Option<TransferFeeTerms> {
    if *mint_owner != spl_token_2022::ID {
        return None;
    }

    Token22MintAccount::unpack(mint_account_data)
        .ok()?
        .transfer_fee(epoch)
}
