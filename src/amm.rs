use anyhow::{Context, Result, bail, ensure};
use rust_decimal::Decimal;

use crate::{
    accounts::KeyedAccount,
    math::{self, ChunkedSwapInput, SwapInput},
    token::{Token22MintAccount, TokenAccount, TransferFeeTerms, is_token_program},
};

pub use crate::math::{ChunkFill, LiquidityChunk};

/// Swap direction (base -> quote or quote -> base)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    BaseToQuote,
    QuoteToBase,
}

/// Pool token reserves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReserves {
    pub base: u64,
    pub quote: u64,
}

impl PoolReserves {
    /// `(this, other)` reserves for a swap in `direction`.
    pub fn oriented(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::BaseToQuote => (self.base, self.quote),
            SwapDirection::QuoteToBase => (self.quote, self.base),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.base == 0 || self.quote == 0
    }
}

/// Quote result
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub amount_in: u64,
    /// Output after every fee, what the trader receives.
    pub amount_out: u64,
    pub fee_amount: u64,
    pub input_transfer_fee: u64,
    pub output_transfer_fee: u64,
    /// Curve-free reference output used for slippage display.
    pub no_impact_amount_out: u64,
    /// Pool fee in percent.
    pub fee_pct: Decimal,
    gross_amount_out: u64,
}

impl Quote {
    pub fn price_impact(&self) -> Option<Decimal> {
        math::price_impact(self.no_impact_amount_out, self.gross_amount_out)
    }
}

/// Everything needed to quote a Let's Cook AMM pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolState {
    pub reserves: PoolReserves,
    pub fee_bps: u16,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub base_transfer_fee: Option<TransferFeeTerms>,
    pub quote_transfer_fee: Option<TransferFeeTerms>,
    /// Liquidity bands with base as `this`. Empty means a single constant-product pool.
    pub chunks: Vec<LiquidityChunk>,
}

impl PoolState {
    pub fn new(reserves: PoolReserves, fee_bps: u16, base_decimals: u8, quote_decimals: u8) -> Self {
        Self {
            reserves,
            fee_bps,
            base_decimals,
            quote_decimals,
            ..Default::default()
        }
    }

    pub fn with_transfer_fees(
        mut self,
        base: Option<TransferFeeTerms>,
        quote: Option<TransferFeeTerms>,
    ) -> Self {
        self.base_transfer_fee = base;
        self.quote_transfer_fee = quote;
        self
    }

    pub fn with_chunks(mut self, chunks: Vec<LiquidityChunk>) -> Self {
        self.chunks = chunks;
        self
    }

    /// Builds the pool from its two vaults and two mints as fetched from chain.
    /// Transfer fees are those active at `epoch`.
    pub fn from_accounts(
        base_vault: &KeyedAccount,
        quote_vault: &KeyedAccount,
        base_mint: &KeyedAccount,
        quote_mint: &KeyedAccount,
        fee_bps: u16,
        epoch: u64,
    ) -> Result<Self> {
        let base_reserve = vault_balance(base_vault, base_mint)?;
        let quote_reserve = vault_balance(quote_vault, quote_mint)?;

        let (base_decimals, base_transfer_fee) = mint_terms(base_mint, epoch)?;
        let (quote_decimals, quote_transfer_fee) = mint_terms(quote_mint, epoch)?;

        Ok(Self::new(
            PoolReserves {
                base: base_reserve,
                quote: quote_reserve,
            },
            fee_bps,
            base_decimals,
            quote_decimals,
        )
        .with_transfer_fees(base_transfer_fee, quote_transfer_fee))
    }

    fn decimals(&self, direction: SwapDirection) -> (u8, u8) {
        match direction {
            SwapDirection::BaseToQuote => (self.base_decimals, self.quote_decimals),
            SwapDirection::QuoteToBase => (self.quote_decimals, self.base_decimals),
        }
    }

    fn transfer_fees(
        &self,
        direction: SwapDirection,
    ) -> (Option<TransferFeeTerms>, Option<TransferFeeTerms>) {
        match direction {
            SwapDirection::BaseToQuote => (self.base_transfer_fee, self.quote_transfer_fee),
            SwapDirection::QuoteToBase => (self.quote_transfer_fee, self.base_transfer_fee),
        }
    }

    /// Get a quote for swapping `amount_in` in `direction`
    pub fn quote(&self, amount_in: u64, direction: SwapDirection) -> Result<Quote> {
        let (input_transfer_fee, output_transfer_fee) = self.transfer_fees(direction);
        let fee_pct = Decimal::new(i64::from(self.fee_bps), 2);

        if self.chunks.is_empty() {
            if self.reserves.is_empty() {
                log::trace!("Pool has no liquidity, quoting zero output for {}", amount_in);
            }

            let (this_reserve, other_reserve) = self.reserves.oriented(direction);
            let result = math::swap_output(&SwapInput {
                amount_in,
                this_reserve,
                other_reserve,
                fee_bps: self.fee_bps,
                input_transfer_fee,
                output_transfer_fee,
            })
            .context("Failed to compute swap output")?;

            return Ok(Quote {
                amount_in,
                amount_out: result.final_amount_out,
                fee_amount: result.fee_amount,
                input_transfer_fee: result.input_transfer_fee,
                output_transfer_fee: result.output_transfer_fee,
                no_impact_amount_out: result.no_impact_amount_out,
                fee_pct,
                gross_amount_out: result.amount_out,
            });
        }

        let chunks: Vec<LiquidityChunk> = match direction {
            SwapDirection::BaseToQuote => self.chunks.clone(),
            SwapDirection::QuoteToBase => self.chunks.iter().map(LiquidityChunk::flipped).collect(),
        };
        if chunks.iter().all(LiquidityChunk::is_empty) {
            log::trace!("All liquidity chunks are empty, quoting zero output for {}", amount_in);
        }

        let result = math::chunked_output(&ChunkedSwapInput {
            amount_in,
            chunks: &chunks,
            fee_bps: self.fee_bps,
            input_transfer_fee,
            output_transfer_fee,
        })
        .context("Failed to compute chunked swap output")?;

        Ok(Quote {
            amount_in,
            amount_out: result.final_amount_out,
            fee_amount: result.fee_amount,
            input_transfer_fee: result.input_transfer_fee,
            output_transfer_fee: result.output_transfer_fee,
            no_impact_amount_out: result.no_impact_amount_out,
            fee_pct,
            gross_amount_out: result.amount_out,
        })
    }

    /// `quote.amount_out` in whole output tokens.
    pub fn ui_amount_out(&self, quote: &Quote, direction: SwapDirection) -> Result<Decimal> {
        let (_, output_decimals) = self.decimals(direction);
        math::ui_amount(quote.amount_out, output_decimals).context("Failed to scale output amount")
    }

    /// Output for one whole input token, in whole output tokens. The rate is quoted
    /// fee-free: neither the pool fee nor transfer fees are taken.
    pub fn rate(&self, direction: SwapDirection) -> Result<Decimal> {
        let (input_decimals, _) = self.decimals(direction);
        let one = math::one_token(input_decimals).context("Failed to size one input token")?;
        let fee_free = Self {
            fee_bps: 0,
            base_transfer_fee: None,
            quote_transfer_fee: None,
            ..self.clone()
        };
        let quote = fee_free.quote(one, direction)?;
        self.ui_amount_out(&quote, direction)
    }
}

fn vault_balance(vault: &KeyedAccount, mint: &KeyedAccount) -> Result<u64> {
    ensure!(
        is_token_program(&vault.owner),
        "Vault {} is owned by {}, not a token program",
        vault.key,
        vault.owner
    );
    let account = TokenAccount::unpack(&vault.data)
        .with_context(|| format!("Failed to decode token account {}", vault.key))?;
    if account.mint != mint.key {
        bail!(
            "Vault {} holds mint {}, expected {}",
            vault.key,
            account.mint,
            mint.key
        );
    }
    Ok(account.amount)
}

fn mint_terms(mint: &KeyedAccount, epoch: u64) -> Result<(u8, Option<TransferFeeTerms>)> {
    ensure!(
        is_token_program(&mint.owner),
        "Mint {} is owned by {}, not a token program",
        mint.key,
        mint.owner
    );
    let state = Token22MintAccount::unpack(&mint.data)
        .with_context(|| format!("Failed to decode mint {}", mint.key))?;

    // classic SPL mints cannot carry extensions
    let transfer_fee = if mint.owner == spl_token_2022::ID {
        state.transfer_fee(epoch)
    } else {
        None
    };
    Ok((state.decimals, transfer_fee))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{program_option::COption, program_pack::Pack, pubkey::Pubkey};
    use std::str::FromStr;

    fn pool() -> PoolState {
        PoolState::new(
            PoolReserves {
                base: 1_000_000,
                quote: 1_000_000,
            },
            30,
            0,
            0,
        )
    }

    #[test]
    fn test_quote_simple_pool() {
        let quote = pool().quote(1_000, SwapDirection::BaseToQuote).unwrap();
        assert_eq!(quote.amount_out, 996);
        assert_eq!(quote.fee_amount, 3);
        assert_eq!(quote.fee_pct, Decimal::from_str("0.30").unwrap());
        assert_eq!(quote.no_impact_amount_out, 997);
        assert!(quote.price_impact().unwrap() > Decimal::ZERO);
    }

    #[test]
    fn test_quote_uses_direction_specific_fees() {
        let state = PoolState::new(
            PoolReserves {
                base: 2_000_000,
                quote: 1_000_000,
            },
            0,
            6,
            9,
        )
        .with_transfer_fees(Some(TransferFeeTerms::new(200, 10)), None);

        let sell = state.quote(1_000, SwapDirection::BaseToQuote).unwrap();
        assert_eq!(sell.input_transfer_fee, 10);
        assert_eq!(sell.output_transfer_fee, 0);

        let buy = state.quote(1_000, SwapDirection::QuoteToBase).unwrap();
        assert_eq!(buy.input_transfer_fee, 0);
        assert_eq!(buy.output_transfer_fee, 10);
    }

    #[test]
    fn test_empty_pool_quotes_zero() {
        let state = PoolState::new(PoolReserves::default(), 30, 9, 9);
        let quote = state.quote(1_000_000, SwapDirection::QuoteToBase).unwrap();
        assert_eq!(quote.amount_out, 0);
        assert_eq!(quote.price_impact(), None);
    }

    #[test]
    fn test_fee_out_of_range_is_an_error() {
        let mut state = pool();
        state.fee_bps = 10_001;
        let err = state.quote(1, SwapDirection::BaseToQuote).unwrap_err();
        assert!(err.to_string().contains("Failed to compute swap output"));
    }

    #[test]
    fn test_chunked_quote_flips_for_quote_input() {
        let state = pool().with_chunks(vec![LiquidityChunk::new(1_000_000, 1_000_000)]);
        let chunked = state.quote(1_000, SwapDirection::QuoteToBase).unwrap();
        let simple = pool().quote(1_000, SwapDirection::QuoteToBase).unwrap();
        assert_eq!(chunked, simple);
    }

    #[test]
    fn test_rate_is_one_whole_token() {
        let state = PoolState::new(
            PoolReserves {
                base: 1_000_000_000_000,
                quote: 2_000_000_000_000,
            },
            0,
            6,
            6,
        );
        // 1 base token moves the price a hair
        let rate = state.rate(SwapDirection::BaseToQuote).unwrap();
        assert_eq!(rate, Decimal::from_str("1.999998").unwrap());
    }

    #[test]
    fn test_rate_ignores_fees() {
        let state = PoolState::new(
            PoolReserves {
                base: 1_000_000_000_000,
                quote: 2_000_000_000_000,
            },
            100,
            6,
            6,
        )
        .with_transfer_fees(Some(TransferFeeTerms::new(500, u64::MAX)), None);

        assert_eq!(
            state.rate(SwapDirection::BaseToQuote).unwrap(),
            Decimal::from_str("1.999998").unwrap(),
            "rate is quoted without the pool or transfer fee"
        );

        let one_token = state.quote(1_000_000, SwapDirection::BaseToQuote).unwrap();
        assert!(one_token.amount_out < 1_999_998, "quotes still charge both fees");
    }

    #[test]
    fn test_pool_from_accounts() {
        let base_mint_key = Pubkey::new_unique();
        let quote_mint_key = Pubkey::new_unique();

        let mint = |decimals| {
            let mint = spl_token::state::Mint {
                decimals,
                is_initialized: true,
                ..Default::default()
            };
            let mut data = vec![0u8; spl_token::state::Mint::LEN];
            mint.pack_into_slice(&mut data);
            data
        };
        let vault = |mint_key, amount| {
            let account = spl_token::state::Account {
                mint: mint_key,
                owner: Pubkey::new_unique(),
                amount,
                delegate: COption::None,
                state: spl_token::state::AccountState::Initialized,
                is_native: COption::None,
                delegated_amount: 0,
                close_authority: COption::None,
            };
            let mut data = vec![0u8; spl_token::state::Account::LEN];
            account.pack_into_slice(&mut data);
            data
        };

        let base_mint = KeyedAccount::new(base_mint_key, spl_token::ID, mint(6));
        let quote_mint = KeyedAccount::new(quote_mint_key, spl_token_2022::ID, mint(9));
        let base_vault = KeyedAccount::new(Pubkey::new_unique(), spl_token::ID, vault(base_mint_key, 500));
        let quote_vault = KeyedAccount::new(Pubkey::new_unique(), spl_token::ID, vault(quote_mint_key, 700));

        let state =
            PoolState::from_accounts(&base_vault, &quote_vault, &base_mint, &quote_mint, 25, 0)
                .unwrap();
        assert_eq!(state.reserves, PoolReserves { base: 500, quote: 700 });
        assert_eq!((state.base_decimals, state.quote_decimals), (6, 9));
        assert_eq!(state.base_transfer_fee, None);

        let err = PoolState::from_accounts(&quote_vault, &base_vault, &base_mint, &quote_mint, 25, 0)
            .unwrap_err();
        assert!(err.to_string().contains("expected"));

        let stray_vault = KeyedAccount::new(base_vault.key, Pubkey::new_unique(), base_vault.data.clone());
        let err = PoolState::from_accounts(&stray_vault, &quote_vault, &base_mint, &quote_mint, 25, 0)
            .unwrap_err();
        assert!(err.to_string().contains("not a token program"));

        let stray_mint = KeyedAccount::new(base_mint_key, Pubkey::new_unique(), base_mint.data.clone());
        let err = PoolState::from_accounts(&base_vault, &quote_vault, &stray_mint, &quote_mint, 25, 0)
            .unwrap_err();
        assert!(err.to_string().contains("not a token program"));
    }
}
