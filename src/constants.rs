// SEEDS
pub const COLLECTION_SEED: &[u8] = b"Collection";
pub const LOOKUP_SEED: &[u8] = b"Lookup";
pub const ASSIGNMENT_SEED: &[u8] = b"assignment";
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

pub const LAMPORTS_PER_SOL: u64 = solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Basis points in 100%.
pub const BPS_DENOMINATOR: u64 = 10_000;

// Token-2022 extension flags carried in the `extensions` byte of launch instructions
pub const EXTENSION_TRANSFER_FEE: u8 = 1 << 0;
pub const EXTENSION_PERMANENT_DELEGATE: u8 = 1 << 1;
pub const EXTENSION_TRANSFER_HOOK: u8 = 1 << 2;

/// OpenBook serum v3 market header tag, `"serum"`.
pub const MARKET_HEADER: [u8; 5] = *b"serum";
/// OpenBook serum v3 market footer tag, `"padding"`.
pub const MARKET_FOOTER: [u8; 7] = *b"padding";

/// Raydium AMM v4 `initialize2` instruction tag.
pub const RAYDIUM_CREATE_POOL_TAG: u8 = 1;
