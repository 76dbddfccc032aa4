//! # Let's Cook SDK
//!
//! A standalone SDK for the Let's Cook launchpad program on Solana. It covers the three pieces a
//! client needs without talking to the network itself:
//!
//! 1. **Codec**: byte-exact decoding of program accounts (`LaunchData`, `UserData`, `JoinData`),
//!    SPL token/mint layouts, OpenBook markets and transfer-hook metadata, plus encoding of every
//!    launchpad instruction payload
//! 2. **Addresses**: program-derived address helpers for collections, NFT lookups, assignments,
//!    transfer-hook validation accounts and associated token accounts
//! 3. **Quotes**: the AMM swap calculator, with pool fees, Token-2022 transfer fees and chunked
//!    liquidity
//!
//! > **📚 Fetching is up to you**: every function takes bytes or numbers you already fetched
//! > (e.g. via `getProgramAccounts`), and hands back typed records, instruction data, addresses
//! > and quotes.
//!
//! ## 🚀 Quick Start
//!
//! ### Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! letscook-sdk = "0.1.0"
//! ```
//!
//! ## 📖 Usage Patterns
//!
//! ### 1. Decoding Program Accounts
//!
//! The first byte of every program account names its type. `decode_program_account` dispatches
//! on it; `scan_program_accounts` does the same for a whole `getProgramAccounts` result and
//! drops accounts it cannot (or should not) decode.
//!
//! ```rust
//! use letscook_sdk::{AccountFilter, KeyedAccount, ProgramAccount, scan_program_accounts};
//!
//! let accounts: Vec<KeyedAccount> = vec![]; // from your RPC client
//!
//! // skip discriminator 1, as the launch list page does
//! for (key, account) in scan_program_accounts(&accounts, &AccountFilter::excluding(&[1])) {
//!     match account {
//!         ProgramAccount::Join(join) => println!("{key}: {} tickets", join.num_tickets),
//!         ProgramAccount::User(user) => println!("{key}: {}", user.user_name),
//!         ProgramAccount::Launch(launch) => println!("{key}: {}", launch.name),
//!     }
//! }
//! ```
//!
//! ### 2. Building Instruction Data
//!
//! ```rust
//! use letscook_sdk::codec::to_bytes;
//! use letscook_sdk::instructions::{BuyTicketsInstruction, LaunchDataUserInput, create_launch_instruction};
//!
//! let buy = to_bytes(&BuyTicketsInstruction::new(5)).unwrap();
//! assert_eq!(buy, vec![2, 5, 0]);
//!
//! let input = LaunchDataUserInput {
//!     name: "Cook".to_string(),
//!     symbol: "COOK".to_string(),
//!     decimals: 9,
//!     num_mints: 1_000,
//!     ticket_price: 100_000_000, // lamports
//!     ..Default::default()
//! };
//! let create = to_bytes(&create_launch_instruction(&input).unwrap()).unwrap();
//! assert_eq!(create[0], 1);
//! ```
//!
//! ### 3. Deriving Addresses
//!
//! The program ID and SOL account seed depend on the deployment, so they are passed in through
//! `ProgramConfig`.
//!
//! ```rust
//! use letscook_sdk::pda::{ProgramConfig, collection_account, program_sol_account};
//! use solana_sdk::pubkey::Pubkey;
//!
//! let config = ProgramConfig::new(Pubkey::new_unique(), 59);
//! let (sol_account, _bump) = program_sol_account(&config).unwrap();
//! let (collection, _bump) = collection_account(&config, "pots").unwrap();
//! assert_ne!(sol_account, collection);
//! ```
//!
//! ### 4. Quoting Swaps
//!
//! ```rust
//! use letscook_sdk::{PoolReserves, PoolState, SwapDirection, TransferFeeTerms};
//!
//! let pool = PoolState::new(PoolReserves { base: 1_000_000, quote: 1_000_000 }, 30, 6, 6)
//!     .with_transfer_fees(Some(TransferFeeTerms::new(200, 10)), None);
//!
//! let quote = pool.quote(1_000, SwapDirection::BaseToQuote).unwrap();
//! println!("out: {} (fee {}%)", quote.amount_out, quote.fee_pct);
//! ```
//!
//! ## 🔧 API Reference
//!
//! - **`codec`** - borsh `to_bytes`, `from_bytes`, `from_bytes_exact` and `FixedLen`
//! - **`state`** - `LaunchData`, `JoinData`, `UserData`, `AccountType` and index enums
//! - **`token`** - `Token22MintAccount`, `TokenAccount`, `ExtraAccountMeta*`, `mint_transfer_fee`, `is_token_program`
//! - **`market`** - `MarketStateLayoutV2`
//! - **`instructions`** - `LaunchInstruction` and every payload, user-input builders, `sol_to_lamports`
//! - **`pda`** - `derive_address` and the named derivations
//! - **`math`** - fee helpers, `swap_output`, `chunked_output`, `ui_amount`
//! - **`PoolState`** - `quote`, `rate`, `ui_amount_out`, `from_accounts`
//!
//! ## ⚠️ Numbers
//!
//! All on-chain amounts stay `u64` end to end. `rust_decimal::Decimal` is used only for display
//! values (UI amounts, rates, fee percentages, price impact).
//!
//! ## 📄 License
//!
//! MIT License.

pub mod accounts;
mod amm; // Private module - users should use re-exported types
pub mod codec;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod market;
pub mod math;
pub mod pda;
pub mod state;
pub mod token;

pub use accounts::{
    AccountFilter, KeyedAccount, ProgramAccount, decode_account, decode_program_account,
    scan_program_accounts,
};

pub use amm::{
    ChunkFill, LiquidityChunk, PoolReserves, PoolState, Quote, SwapDirection,
};

pub use error::{AmmError, CodecError, DerivationError};

pub use state::{AccountType, JoinData, LaunchData, UserData};

pub use token::TransferFeeTerms;
