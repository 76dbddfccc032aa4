use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{
    codec::FixedLen,
    constants::{MARKET_FOOTER, MARKET_HEADER},
};

/// OpenBook (serum v3) market state, as created ahead of the Raydium pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MarketStateLayoutV2 {
    pub header: [u8; 5],
    pub account_flags: u64,
    pub own_address: Pubkey,
    pub vault_signer_nonce: u64,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_vault: Pubkey,
    pub base_deposits_total: u64,
    pub base_fees_accrued: u64,
    pub quote_vault: Pubkey,
    pub quote_deposits_total: u64,
    pub quote_fees_accrued: u64,
    pub quote_dust_threshold: u64,
    pub request_queue: Pubkey,
    pub event_queue: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
    pub fee_rate_bps: u64,
    pub referrer_rebates_accrued: u64,
    pub footer: [u8; 7],
}

impl MarketStateLayoutV2 {
    /// Whether the account carries the `serum` ... `padding` framing.
    pub fn has_serum_framing(&self) -> bool {
        self.header == MARKET_HEADER && self.footer == MARKET_FOOTER
    }
}

impl FixedLen for MarketStateLayoutV2 {
    const LEN: usize = 388;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, from_bytes_exact, to_bytes};

    fn sample_market() -> MarketStateLayoutV2 {
        MarketStateLayoutV2 {
            header: MARKET_HEADER,
            account_flags: 3,
            own_address: Pubkey::new_unique(),
            vault_signer_nonce: 1,
            base_mint: Pubkey::new_unique(),
            quote_mint: Pubkey::new_unique(),
            base_vault: Pubkey::new_unique(),
            base_deposits_total: 0,
            base_fees_accrued: 0,
            quote_vault: Pubkey::new_unique(),
            quote_deposits_total: 0,
            quote_fees_accrued: 0,
            quote_dust_threshold: 100,
            request_queue: Pubkey::new_unique(),
            event_queue: Pubkey::new_unique(),
            bids: Pubkey::new_unique(),
            asks: Pubkey::new_unique(),
            base_lot_size: 1_000,
            quote_lot_size: 10,
            fee_rate_bps: 0,
            referrer_rebates_accrued: u64::MAX,
            footer: MARKET_FOOTER,
        }
    }

    #[test]
    fn test_market_layout_size_and_offsets() {
        let market = sample_market();
        let bytes = to_bytes(&market).unwrap();
        assert_eq!(bytes.len(), MarketStateLayoutV2::LEN);
        assert_eq!(&bytes[..5], b"serum");
        assert_eq!(&bytes[381..], b"padding");
        // base_mint sits after header, flags, own address and nonce
        assert_eq!(&bytes[53..85], market.base_mint.as_ref());
        assert!(market.has_serum_framing());

        assert_eq!(from_bytes_exact::<MarketStateLayoutV2>(&bytes).unwrap(), market);
    }

    #[test]
    fn test_short_market_buffer_fails() {
        let bytes = to_bytes(&sample_market()).unwrap();
        assert!(from_bytes::<MarketStateLayoutV2>(&bytes[..387]).is_err());
    }
}
