//! Program-derived addresses used by the launchpad.

use solana_sdk::pubkey::{MAX_SEED_LEN, MAX_SEEDS, Pubkey};

use crate::{
    constants::{ASSIGNMENT_SEED, COLLECTION_SEED, EXTRA_ACCOUNT_METAS_SEED, LOOKUP_SEED},
    error::DerivationError,
};

/// Caller seeds per derivation; the last slot is taken by the bump.
pub const MAX_USER_SEEDS: usize = MAX_SEEDS - 1;

/// Deployment-specific values of the Let's Cook program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramConfig {
    pub program_id: Pubkey,
    pub sol_account_seed: u32,
}

impl ProgramConfig {
    pub fn new(program_id: Pubkey, sol_account_seed: u32) -> Self {
        Self {
            program_id,
            sol_account_seed,
        }
    }
}

pub fn u8_le_bytes(value: u8) -> [u8; 1] {
    value.to_le_bytes()
}

pub fn u16_le_bytes(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

pub fn u32_le_bytes(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Finds the canonical `(address, bump)` for `seeds` under `program_id`, searching
/// bumps downward from 255.
pub fn derive_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    if seeds.len() > MAX_USER_SEEDS {
        return Err(DerivationError::TooManySeeds { count: seeds.len() });
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(DerivationError::SeedTooLong {
            index,
            len: seed.len(),
        });
    }

    Pubkey::try_find_program_address(seeds, program_id).ok_or(DerivationError::NoViableBump)
}

/// The program's SOL treasury.
pub fn program_sol_account(config: &ProgramConfig) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[&u32_le_bytes(config.sol_account_seed)],
        &config.program_id,
    )
}

pub fn nft_lookup_account(
    config: &ProgramConfig,
    collection_mint: &Pubkey,
    nft_index: u32,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[
            collection_mint.as_ref(),
            &u32_le_bytes(nft_index),
            LOOKUP_SEED,
        ],
        &config.program_id,
    )
}

pub fn collection_account(
    config: &ProgramConfig,
    page_name: &str,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[page_name.as_bytes(), COLLECTION_SEED],
        &config.program_id,
    )
}

pub fn nft_assignment_account(
    config: &ProgramConfig,
    wallet: &Pubkey,
    collection_mint: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[wallet.as_ref(), collection_mint.as_ref(), ASSIGNMENT_SEED],
        &config.program_id,
    )
}

/// Account listing the extra metas a transfer-hook program needs for `mint`.
pub fn transfer_hook_validation_account(
    hook_program: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(&[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()], hook_program)
}

pub fn associated_token_account(
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        &spl_associated_token_account::ID,
    )
}
