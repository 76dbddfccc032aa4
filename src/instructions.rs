//! Instruction payloads for the Let's Cook program and the Raydium/OpenBook calls the
//! launch flow issues. Every payload leads with its discriminator and is encode-only.

use borsh::BorshSerialize;
use num_traits::{Bounded, ToPrimitive};
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;

use crate::{
    codec::FixedLen,
    constants::{
        EXTENSION_PERMANENT_DELEGATE, EXTENSION_TRANSFER_FEE, EXTENSION_TRANSFER_HOOK,
        LAMPORTS_PER_SOL, RAYDIUM_CREATE_POOL_TAG,
    },
    error::CodecError,
    state::{LaunchData, LaunchKeys, Socials},
};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize)]
#[borsh(use_discriminant = true)]
pub enum LaunchInstruction {
    Init = 0,
    CreateGame = 1,
    BuyTickets = 2,
    CheckTickets = 3,
    InitMarket = 4,
    HypeVote = 5,
    ClaimRefund = 6,
    EditLaunch = 7,
    ClaimTokens = 8,
    EditUser = 9,
    PlaceMarketOrder = 10,
    GetMMRewards = 11,
    CloseAccount = 12,
    LaunchCollection = 13,
    ClaimNft = 14,
    MintNft = 15,
    WrapNft = 16,
    EditCollection = 17,
    MintRandom = 18,
}

/// Token-2022 extensions requested for a new mint, as a bit set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extensions(u8);

impl Extensions {
    pub fn new(transfer_fee: bool, permanent_delegate: bool, transfer_hook: bool) -> Self {
        let mut bits = 0;
        if transfer_fee {
            bits |= EXTENSION_TRANSFER_FEE;
        }
        if permanent_delegate {
            bits |= EXTENSION_PERMANENT_DELEGATE;
        }
        if transfer_hook {
            bits |= EXTENSION_TRANSFER_HOOK;
        }
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, flag: u8) -> bool {
        self.0 & flag == flag
    }
}

/// Converts a user-entered number to its narrower wire type.
pub(crate) fn narrow<T, U>(field: &'static str, value: T) -> Result<U, CodecError>
where
    T: Copy + Into<u64>,
    U: TryFrom<T> + Bounded + Into<u64>,
{
    U::try_from(value).map_err(|_| CodecError::ValueOutOfRange {
        field,
        value: value.into(),
        max: U::max_value().into(),
    })
}

/// Lamports in `sol`, as the launch forms enter prices. Fractions of a lamport are
/// dropped; negative or oversized amounts give `None`.
pub fn sol_to_lamports(sol: Decimal) -> Option<u64> {
    sol.checked_mul(Decimal::from(LAMPORTS_PER_SOL))?.trunc().to_u64()
}

fn narrow_all<T, U>(field: &'static str, values: &[T]) -> Result<Vec<U>, CodecError>
where
    T: Copy + Into<u64>,
    U: TryFrom<T> + Bounded + Into<u64>,
{
    values.iter().map(|value| narrow(field, *value)).collect()
}

/// Parameters of a new token launch as entered by the creator. Prices are lamports
/// and dates are Unix milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchDataUserInput {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub icon_url: String,
    pub banner_url: String,
    pub page_name: String,
    pub description: String,
    pub web_url: String,
    pub twt_url: String,
    pub tele_url: String,
    pub disc_url: String,

    pub total_supply: u64,
    pub decimals: u32,
    pub num_mints: u64,
    pub minimum_liquidity: u64,
    pub ticket_price: u64,
    /// Whole percentages indexed by `Distribution`.
    pub distribution: Vec<u32>,
    pub open_date: u64,
    pub close_date: u64,
    pub team_wallet: Option<Pubkey>,
    pub amm_fee: u32,

    pub transfer_fee: u32,
    pub max_transfer_fee: u64,
    pub permanent_delegate: Option<Pubkey>,
    pub transfer_hook_program: Option<Pubkey>,
}

impl LaunchDataUserInput {
    /// Form contents for editing an existing launch. Extension settings cannot be
    /// edited and start empty.
    pub fn from_launch(launch: &LaunchData) -> Self {
        let social = |which| launch.social(which).unwrap_or_default().to_string();

        Self {
            name: launch.name.clone(),
            symbol: launch.symbol.clone(),
            uri: launch.meta_url.clone(),
            icon_url: launch.icon.clone(),
            banner_url: launch.banner.clone(),
            page_name: launch.page_name.clone(),
            description: launch.description.clone(),
            web_url: social(Socials::Website),
            twt_url: social(Socials::Twitter),
            tele_url: social(Socials::Telegram),
            disc_url: social(Socials::Discord),

            total_supply: launch.total_supply,
            decimals: launch.decimals.into(),
            num_mints: launch.num_mints.into(),
            minimum_liquidity: launch
                .ticket_price
                .saturating_mul(u64::from(launch.num_mints)),
            ticket_price: launch.ticket_price,
            distribution: launch.distribution.iter().map(|s| u32::from(*s)).collect(),
            open_date: launch.launch_date,
            close_date: launch.end_date,
            team_wallet: launch.key(LaunchKeys::TeamWallet).copied(),
            ..Default::default()
        }
    }

    /// Socials in on-chain order: website, twitter, telegram, discord.
    pub fn socials(&self) -> Vec<String> {
        vec![
            self.web_url.clone(),
            self.twt_url.clone(),
            self.tele_url.clone(),
            self.disc_url.clone(),
        ]
    }

    pub fn distribution(&self) -> Result<Vec<u8>, CodecError> {
        narrow_all("distribution", &self.distribution)
    }

    pub fn extensions(&self) -> Extensions {
        Extensions::new(
            self.transfer_fee > 0,
            self.permanent_delegate.is_some(),
            self.transfer_hook_program.is_some(),
        )
    }
}

/// Parameters of a new NFT collection launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionDataUserInput {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub icon_url: String,
    pub banner_url: String,
    pub page_name: String,
    pub description: String,
    pub web_url: String,
    pub twt_url: String,
    pub tele_url: String,
    pub disc_url: String,

    pub num_mints: u64,
    pub ticket_price: u64,

    pub transfer_fee: u32,
    pub max_transfer_fee: u64,
    pub permanent_delegate: Option<Pubkey>,
    pub transfer_hook_program: Option<Pubkey>,
}

impl CollectionDataUserInput {
    pub fn extensions(&self) -> Extensions {
        Extensions::new(
            self.transfer_fee > 0,
            self.permanent_delegate.is_some(),
            self.transfer_hook_program.is_some(),
        )
    }
}

/// Instructions that carry nothing but their discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct BasicInstruction {
    pub instruction: LaunchInstruction,
}

impl BasicInstruction {
    pub fn new(instruction: LaunchInstruction) -> Self {
        Self { instruction }
    }
}

impl FixedLen for BasicInstruction {
    const LEN: usize = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct CreateLaunchInstruction {
    pub instruction: LaunchInstruction,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub icon: String,
    pub banner: String,
    pub total_supply: u64,
    pub decimals: u8,
    pub launch_date: u64,
    pub close_date: u64,
    pub num_mints: u32,
    pub ticket_price: u64,
    pub page_name: String,
    pub transfer_fee: u16,
    pub max_transfer_fee: u64,
    pub extensions: u8,
}

/// Builds the `create_game` payload for a new launch.
pub fn create_launch_instruction(
    input: &LaunchDataUserInput,
) -> Result<CreateLaunchInstruction, CodecError> {
    Ok(CreateLaunchInstruction {
        instruction: LaunchInstruction::CreateGame,
        name: input.name.clone(),
        symbol: input.symbol.clone(),
        uri: input.uri.clone(),
        icon: input.icon_url.clone(),
        banner: input.banner_url.clone(),
        total_supply: input.total_supply,
        decimals: narrow("decimals", input.decimals)?,
        launch_date: input.open_date,
        close_date: input.close_date,
        num_mints: narrow("num_mints", input.num_mints)?,
        ticket_price: input.ticket_price,
        page_name: input.page_name.clone(),
        transfer_fee: narrow("transfer_fee", input.transfer_fee)?,
        max_transfer_fee: input.max_transfer_fee,
        extensions: input.extensions().bits(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct EditLaunchInstruction {
    pub instruction: LaunchInstruction,
    pub description: String,
    pub distribution: Vec<u8>,
    pub website: String,
    pub twitter: String,
    pub telegram: String,
    pub discord: String,
    pub amm_fee: u16,
}

pub fn edit_launch_instruction(
    input: &LaunchDataUserInput,
) -> Result<EditLaunchInstruction, CodecError> {
    Ok(EditLaunchInstruction {
        instruction: LaunchInstruction::EditLaunch,
        description: input.description.clone(),
        distribution: input.distribution()?,
        website: input.web_url.clone(),
        twitter: input.twt_url.clone(),
        telegram: input.tele_url.clone(),
        discord: input.disc_url.clone(),
        amm_fee: narrow("amm_fee", input.amm_fee)?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct EditUserInstruction {
    pub instruction: LaunchInstruction,
    pub name: String,
}

impl EditUserInstruction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            instruction: LaunchInstruction::EditUser,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct HypeVoteInstruction {
    pub instruction: LaunchInstruction,
    pub launch_type: u8,
    pub game_id: u64,
    pub vote: u8,
}

impl HypeVoteInstruction {
    pub fn new(launch_type: u8, game_id: u64, vote: u8) -> Self {
        Self {
            instruction: LaunchInstruction::HypeVote,
            launch_type,
            game_id,
            vote,
        }
    }
}

impl FixedLen for HypeVoteInstruction {
    const LEN: usize = 11;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct BuyTicketsInstruction {
    pub instruction: LaunchInstruction,
    pub num_tickets: u16,
}

impl BuyTicketsInstruction {
    pub fn new(num_tickets: u16) -> Self {
        Self {
            instruction: LaunchInstruction::BuyTickets,
            num_tickets,
        }
    }
}

impl FixedLen for BuyTicketsInstruction {
    const LEN: usize = 3;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct InitMarketInstruction {
    pub instruction: LaunchInstruction,
    pub vault_signer_nonce: u64,
}

impl InitMarketInstruction {
    pub fn new(vault_signer_nonce: u64) -> Self {
        Self {
            instruction: LaunchInstruction::InitMarket,
            vault_signer_nonce,
        }
    }
}

impl FixedLen for InitMarketInstruction {
    const LEN: usize = 9;
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct LaunchCollectionInstruction {
    pub instruction: LaunchInstruction,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub icon: String,
    pub banner: String,
    pub num_mints: u32,
    pub ticket_price: u64,
    pub page_name: String,
    pub transfer_fee: u16,
    pub max_transfer_fee: u64,
    pub extensions: u8,
    pub description: String,
    pub website: String,
    pub twitter: String,
    pub telegram: String,
    pub discord: String,
}

pub fn launch_collection_instruction(
    input: &CollectionDataUserInput,
) -> Result<LaunchCollectionInstruction, CodecError> {
    Ok(LaunchCollectionInstruction {
        instruction: LaunchInstruction::LaunchCollection,
        name: input.name.clone(),
        symbol: input.symbol.clone(),
        uri: input.uri.clone(),
        icon: input.icon_url.clone(),
        banner: input.banner_url.clone(),
        num_mints: narrow("num_mints", input.num_mints)?,
        ticket_price: input.ticket_price,
        page_name: input.page_name.clone(),
        transfer_fee: narrow("transfer_fee", input.transfer_fee)?,
        max_transfer_fee: input.max_transfer_fee,
        extensions: input.extensions().bits(),
        description: input.description.clone(),
        website: input.web_url.clone(),
        twitter: input.twt_url.clone(),
        telegram: input.tele_url.clone(),
        discord: input.disc_url.clone(),
    })
}

/// OpenBook `InitializeMarket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct RaydiumInitMarketInstruction {
    pub version: u8,
    pub instruction: u32,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
    pub fee_rate_bps: u16,
    pub vault_signer_nonce: u64,
    pub quote_dust_threshold: u64,
}

impl FixedLen for RaydiumInitMarketInstruction {
    const LEN: usize = 39;
}

/// Raydium AMM v4 `initialize2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct RaydiumCreatePoolInstruction {
    pub instruction: u8,
    pub nonce: u8,
    pub open_time: u64,
    pub pc_amount: u64,
    pub coin_amount: u64,
}

impl RaydiumCreatePoolInstruction {
    pub fn new(nonce: u8, open_time: u64, pc_amount: u64, coin_amount: u64) -> Self {
        Self {
            instruction: RAYDIUM_CREATE_POOL_TAG,
            nonce,
            open_time,
            pc_amount,
            coin_amount,
        }
    }
}

impl FixedLen for RaydiumCreatePoolInstruction {
    const LEN: usize = 26;
}
