use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use spl_token_2022::extension::transfer_fee::TransferFee;

use crate::{constants::BPS_DENOMINATOR, error::AmmError, token::TransferFeeTerms};

fn floor_div(amount: u128, numerator: u128, denominator: u128) -> u128 {
    amount * numerator / denominator
}

/// Token-2022 transfer fee withheld from `amount`: `ceil(amount * bps / 10_000)`,
/// capped at the mint's maximum fee and never more than `amount` itself.
pub fn transfer_fee(amount: u64, terms: &TransferFeeTerms) -> u64 {
    let fee = TransferFee {
        epoch: 0u64.into(),
        maximum_fee: terms.maximum_fee.into(),
        transfer_fee_basis_points: terms.basis_points.into(),
    };

    // a raw fee past u64::MAX is above any maximum
    fee.calculate_fee(amount)
        .unwrap_or(terms.maximum_fee)
        .min(amount)
}

fn optional_transfer_fee(amount: u64, terms: Option<&TransferFeeTerms>) -> u64 {
    terms.map_or(0, |terms| transfer_fee(amount, terms))
}

/// Pool trading fee, `floor(amount * fee_bps / 10_000)`.
pub fn pool_fee(amount: u64, fee_bps: u16) -> Result<u64, AmmError> {
    check_fee_bps(fee_bps)?;
    Ok(floor_div(
        u128::from(amount),
        u128::from(fee_bps),
        u128::from(BPS_DENOMINATOR),
    ) as u64)
}

fn check_fee_bps(fee_bps: u16) -> Result<(), AmmError> {
    if u64::from(fee_bps) > BPS_DENOMINATOR {
        return Err(AmmError::FeeOutOfRange {
            bps: fee_bps.into(),
        });
    }
    Ok(())
}

/// `floor(input * other / (this + input))`; an empty pool pays nothing.
pub fn constant_product_output(input: u64, this_reserve: u64, other_reserve: u64) -> u64 {
    if this_reserve == 0 || other_reserve == 0 {
        return 0;
    }

    // (x + dx) * (y - dy) = x * y
    let numerator = u128::from(input) * u128::from(other_reserve);
    let denominator = u128::from(this_reserve) + u128::from(input);
    // always below other_reserve
    (numerator / denominator) as u64
}

/// `input` converted at the pool's current price, ignoring price impact.
pub fn spot_output(input: u64, this_reserve: u64, other_reserve: u64) -> u64 {
    if this_reserve == 0 || other_reserve == 0 {
        return 0;
    }
    let out = floor_div(
        u128::from(input),
        u128::from(other_reserve),
        u128::from(this_reserve),
    );
    u64::try_from(out).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapInput {
    pub amount_in: u64,
    pub this_reserve: u64,
    pub other_reserve: u64,
    pub fee_bps: u16,
    pub input_transfer_fee: Option<TransferFeeTerms>,
    pub output_transfer_fee: Option<TransferFeeTerms>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapOutput {
    pub amount_in: u64,
    pub input_transfer_fee: u64,
    /// What reaches the pool after the input mint's transfer fee.
    pub net_input: u64,
    pub fee_amount: u64,
    pub effective_input: u64,
    /// Curve output before the output mint's transfer fee.
    pub amount_out: u64,
    pub output_transfer_fee: u64,
    pub final_amount_out: u64,
    pub no_impact_amount_out: u64,
}

/// Single-pool swap: input transfer fee, pool fee, constant-product curve, then the
/// output transfer fee.
pub fn swap_output(input: &SwapInput) -> Result<SwapOutput, AmmError> {
    let input_transfer_fee =
        optional_transfer_fee(input.amount_in, input.input_transfer_fee.as_ref());
    let net_input = input.amount_in - input_transfer_fee;

    let fee_amount = pool_fee(net_input, input.fee_bps)?;
    let effective_input = net_input - fee_amount;

    let amount_out =
        constant_product_output(effective_input, input.this_reserve, input.other_reserve);
    let output_transfer_fee =
        optional_transfer_fee(amount_out, input.output_transfer_fee.as_ref());

    Ok(SwapOutput {
        amount_in: input.amount_in,
        input_transfer_fee,
        net_input,
        fee_amount,
        effective_input,
        amount_out,
        output_transfer_fee,
        final_amount_out: amount_out - output_transfer_fee,
        no_impact_amount_out: spot_output(
            effective_input,
            input.this_reserve,
            input.other_reserve,
        ),
    })
}

/// Reserves of one liquidity band, oriented to the swap direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidityChunk {
    pub this_reserve: u64,
    pub other_reserve: u64,
}

impl LiquidityChunk {
    pub fn new(this_reserve: u64, other_reserve: u64) -> Self {
        Self {
            this_reserve,
            other_reserve,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.this_reserve == 0 || self.other_reserve == 0
    }

    pub fn flipped(&self) -> Self {
        Self::new(self.other_reserve, self.this_reserve)
    }

    /// Orders chunks by starting price, highest first.
    fn price_order(&self, other: &LiquidityChunk) -> std::cmp::Ordering {
        let ours = u128::from(self.other_reserve) * u128::from(other.this_reserve);
        let theirs = u128::from(other.other_reserve) * u128::from(self.this_reserve);
        theirs.cmp(&ours)
    }

    /// Effective input this chunk absorbs before its marginal price falls to
    /// `next`'s starting price. `None` when it is already at or below it.
    fn capacity_until(&self, next: &LiquidityChunk) -> Option<u128> {
        // marginal price x*y / x'^2 meets next_y / next_x at
        // x' = sqrt(x * y * next_x / next_y)
        let target = (BigUint::from(self.this_reserve)
            * self.other_reserve
            * next.this_reserve
            / next.other_reserve)
            .sqrt();

        match target.to_u128() {
            Some(target) => target.checked_sub(u128::from(self.this_reserve)),
            None => Some(u128::MAX),
        }
    }
}

/// Chunks may come in any order; they are walked from the best starting price down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkedSwapInput<'a> {
    pub amount_in: u64,
    pub chunks: &'a [LiquidityChunk],
    pub fee_bps: u16,
    pub input_transfer_fee: Option<TransferFeeTerms>,
    pub output_transfer_fee: Option<TransferFeeTerms>,
}

/// How much of the swap one chunk filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkFill {
    /// Position of the chunk in the caller's slice.
    pub chunk_index: usize,
    /// Input routed here, pool fee included.
    pub amount_in: u64,
    pub fee_amount: u64,
    pub amount_out: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkedOutput {
    pub amount_in: u64,
    pub input_transfer_fee: u64,
    pub net_input: u64,
    pub fee_amount: u64,
    pub amount_out: u64,
    pub output_transfer_fee: u64,
    pub final_amount_out: u64,
    /// Effective input at the best chunk's price; compare with `amount_out`.
    pub no_impact_amount_out: u64,
    pub fills: Vec<ChunkFill>,
}

impl ChunkedOutput {
    /// `no_impact_amount_out / amount_out - 1`, the slippage the trade page shows.
    pub fn price_impact(&self) -> Option<Decimal> {
        price_impact(self.no_impact_amount_out, self.amount_out)
    }
}

pub(crate) fn price_impact(no_impact_amount_out: u64, amount_out: u64) -> Option<Decimal> {
    if amount_out == 0 {
        return None;
    }
    Some(Decimal::from(no_impact_amount_out) / Decimal::from(amount_out) - Decimal::ONE)
}

/// Swap across liquidity chunks, best starting price first. Each chunk takes input
/// until its marginal price reaches the next non-empty chunk's starting price; the
/// last one takes whatever is left. The pool fee is charged per chunk, transfer fees
/// once on the way in and once on the way out.
///
/// Fails with [`AmmError::OutputOverflow`] when the chunks together pay out more than
/// a `u64` holds.
pub fn chunked_output(input: &ChunkedSwapInput<'_>) -> Result<ChunkedOutput, AmmError> {
    check_fee_bps(input.fee_bps)?;

    let input_transfer_fee =
        optional_transfer_fee(input.amount_in, input.input_transfer_fee.as_ref());
    let net_input = input.amount_in - input_transfer_fee;

    let mut usable: Vec<(usize, &LiquidityChunk)> = input
        .chunks
        .iter()
        .enumerate()
        .filter(|(_, chunk)| !chunk.is_empty())
        .collect();
    usable.sort_by(|(_, a), (_, b)| a.price_order(b));

    let mut remaining = net_input;
    let mut fee_amount = 0u64;
    let mut effective_total = 0u64;
    let mut total_out = 0u128;
    let mut fills = Vec::new();

    for (position, (chunk_index, chunk)) in usable.iter().enumerate() {
        if remaining == 0 {
            break;
        }

        let take = match usable.get(position + 1) {
            Some((_, next)) => {
                let gross_capacity = chunk
                    .capacity_until(next)
                    .map_or(0, |capacity| gross_for_effective(capacity, input.fee_bps));
                remaining.min(u64::try_from(gross_capacity).unwrap_or(u64::MAX))
            }
            None => remaining,
        };
        if take == 0 {
            continue;
        }

        let chunk_fee = pool_fee(take, input.fee_bps)?;
        let effective = take - chunk_fee;
        let chunk_out = constant_product_output(effective, chunk.this_reserve, chunk.other_reserve);

        remaining -= take;
        fee_amount += chunk_fee;
        effective_total += effective;
        total_out += u128::from(chunk_out);
        fills.push(ChunkFill {
            chunk_index: *chunk_index,
            amount_in: take,
            fee_amount: chunk_fee,
            amount_out: chunk_out,
        });
    }

    let amount_out = u64::try_from(total_out).map_err(|_| AmmError::OutputOverflow)?;
    let no_impact_amount_out = usable.first().map_or(0, |(_, first)| {
        spot_output(effective_total, first.this_reserve, first.other_reserve)
    });
    let output_transfer_fee = optional_transfer_fee(amount_out, input.output_transfer_fee.as_ref());

    Ok(ChunkedOutput {
        amount_in: input.amount_in,
        input_transfer_fee,
        net_input,
        fee_amount,
        amount_out,
        output_transfer_fee,
        final_amount_out: amount_out - output_transfer_fee,
        no_impact_amount_out,
        fills,
    })
}

/// Largest gross input whose post-fee amount stays within `effective`.
fn gross_for_effective(effective: u128, fee_bps: u16) -> u128 {
    let kept = u128::from(BPS_DENOMINATOR) - u128::from(fee_bps);
    if kept == 0 {
        return u128::MAX;
    }
    effective.saturating_mul(u128::from(BPS_DENOMINATOR)) / kept
}

/// Raw token amount in whole-token units, for display only.
pub fn ui_amount(raw: u64, decimals: u8) -> Result<Decimal, AmmError> {
    Decimal::try_from_i128_with_scale(i128::from(raw), u32::from(decimals))
        .map_err(|_| AmmError::InvalidDecimals { decimals })
}

/// `10^decimals`, one whole token in raw units.
pub fn one_token(decimals: u8) -> Result<u64, AmmError> {
    10u64
        .checked_pow(u32::from(decimals))
        .ok_or(AmmError::InvalidDecimals { decimals })
}
