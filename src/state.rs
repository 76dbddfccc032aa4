//! Program-owned account records.
//!
//! Field order in every struct below is the on-chain borsh layout.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{
    codec::FixedLen,
    error::CodecError,
    instructions::{LaunchDataUserInput, narrow},
};

/// First byte of every program-owned account.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Program = 0,
    Launch = 1,
    User = 2,
    Join = 3,
    MMUser = 4,
    MMLaunch = 5,
    Amm = 6,
    TimeSeries = 7,
    CollectionLaunch = 8,
    NftAssignment = 9,
    NftLookup = 10,
}

impl TryFrom<u8> for AccountType {
    type Error = CodecError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Ok(match tag {
            0 => AccountType::Program,
            1 => AccountType::Launch,
            2 => AccountType::User,
            3 => AccountType::Join,
            4 => AccountType::MMUser,
            5 => AccountType::MMLaunch,
            6 => AccountType::Amm,
            7 => AccountType::TimeSeries,
            8 => AccountType::CollectionLaunch,
            9 => AccountType::NftAssignment,
            10 => AccountType::NftLookup,
            tag => return Err(CodecError::UnknownAccountType { tag }),
        })
    }
}

impl From<AccountType> for u8 {
    fn from(account_type: AccountType) -> Self {
        account_type as u8
    }
}

/// Index into `LaunchData::socials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Socials {
    Website = 0,
    Twitter = 1,
    Telegram = 2,
    Discord = 3,
}

/// Index into `LaunchData::distribution`, each entry a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Raffle = 0,
    LP = 1,
    MMRewards = 2,
    LPRewards = 3,
    Airdrops = 4,
    Team = 5,
    Other = 6,
}

impl Distribution {
    pub const LENGTH: usize = 7;

    pub const ALL: [Distribution; Self::LENGTH] = [
        Distribution::Raffle,
        Distribution::LP,
        Distribution::MMRewards,
        Distribution::LPRewards,
        Distribution::Airdrops,
        Distribution::Team,
        Distribution::Other,
    ];
}

/// Index into `LaunchData::keys`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKeys {
    Seller = 0,
    TeamWallet = 1,
    WSOLAddress = 2,
    MintAddress = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum LaunchMeta {
    Raffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum LaunchPlugin {
    MintProbability { mint_prob: u16 },
}

/// A token launch (raffle) account.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LaunchData {
    pub account_type: u8,
    pub launch_meta: LaunchMeta,
    pub plugins: Vec<LaunchPlugin>,
    pub game_id: u64,
    pub last_interaction: i64,
    pub num_interactions: u16,

    pub name: String,
    pub symbol: String,
    pub icon: String,
    pub meta_url: String,
    pub banner: String,
    pub page_name: String,
    pub description: String,

    pub total_supply: u64,
    pub decimals: u8,
    pub num_mints: u32,
    /// Lamports per ticket.
    pub ticket_price: u64,
    pub minimum_liquidity: u64,
    /// Unix milliseconds.
    pub launch_date: u64,
    /// Unix milliseconds.
    pub end_date: u64,

    pub tickets_sold: u32,
    pub tickets_claimed: u32,
    pub mints_won: u32,
    pub positive_votes: u32,
    pub negative_votes: u32,

    pub total_mm_buy_amount: u64,
    pub total_mm_sell_amount: u64,
    pub last_mm_reward_date: u32,

    pub socials: Vec<String>,
    pub distribution: Vec<u8>,
    pub flags: Vec<u8>,
    pub strings: Vec<String>,
    pub keys: Vec<Pubkey>,
}

impl LaunchData {
    /// The record a launch would have before it exists on chain.
    pub fn preview(input: &LaunchDataUserInput) -> Result<Self, CodecError> {
        Ok(Self {
            account_type: AccountType::Launch.into(),
            launch_meta: LaunchMeta::Raffle,
            plugins: Vec::new(),
            game_id: 0,
            last_interaction: 0,
            num_interactions: 0,

            name: input.name.clone(),
            symbol: input.symbol.clone(),
            icon: input.icon_url.clone(),
            meta_url: input.uri.clone(),
            banner: input.banner_url.clone(),
            page_name: input.page_name.clone(),
            description: input.description.clone(),

            total_supply: input.total_supply,
            decimals: narrow("decimals", input.decimals)?,
            num_mints: narrow("num_mints", input.num_mints)?,
            ticket_price: input.ticket_price,
            minimum_liquidity: input.minimum_liquidity,
            launch_date: input.open_date,
            end_date: input.close_date,

            tickets_sold: 0,
            tickets_claimed: 0,
            mints_won: 0,
            positive_votes: 0,
            negative_votes: 0,

            total_mm_buy_amount: 0,
            total_mm_sell_amount: 0,
            last_mm_reward_date: 0,

            socials: input.socials(),
            distribution: input.distribution()?,
            flags: Vec::new(),
            strings: Vec::new(),
            keys: Vec::new(),
        })
    }

    pub fn social(&self, social: Socials) -> Option<&str> {
        self.socials.get(social as usize).map(String::as_str)
    }

    pub fn distribution_share(&self, bucket: Distribution) -> Option<u8> {
        self.distribution.get(bucket as usize).copied()
    }

    /// Sum of all distribution percentages. Not checked against 100 here.
    pub fn distribution_total(&self) -> u32 {
        self.distribution.iter().map(|share| u32::from(*share)).sum()
    }

    pub fn key(&self, key: LaunchKeys) -> Option<&Pubkey> {
        self.keys.get(key as usize)
    }
}

/// A user's ticket holding in one launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct JoinData {
    pub account_type: u8,
    pub joiner_key: Pubkey,
    pub game_id: u64,
    pub num_tickets: u16,
    pub num_claimed_tickets: u16,
    pub num_winning_tickets: u16,
    pub ticket_status: u8,
}

impl FixedLen for JoinData {
    const LEN: usize = 48;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UserStats {
    pub flags: Vec<u8>,
    pub values: Vec<u32>,
    pub amounts: Vec<u64>,
    pub achievements: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UserData {
    pub account_type: u8,
    pub user_key: Pubkey,
    pub user_name: String,
    pub total_points: u32,
    pub votes: Vec<u64>,
    pub stats: UserStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_bytes, from_bytes_exact, to_bytes};
    use assert_matches::assert_matches;
    use std::io::ErrorKind;

    fn sample_launch() -> LaunchData {
        LaunchData {
            account_type: AccountType::Launch.into(),
            launch_meta: LaunchMeta::Raffle,
            plugins: vec![LaunchPlugin::MintProbability { mint_prob: 2_500 }],
            game_id: 42,
            last_interaction: -1,
            num_interactions: 3,
            name: "Cook".to_string(),
            symbol: "COOK".to_string(),
            icon: "https://ipfs/icon.png".to_string(),
            meta_url: "https://ipfs/meta.json".to_string(),
            banner: String::new(),
            page_name: "cook".to_string(),
            description: "a launch ☕".to_string(),
            total_supply: u64::MAX,
            decimals: 9,
            num_mints: 1_000,
            ticket_price: 100_000_000,
            minimum_liquidity: 1 << 53,
            launch_date: 1_700_000_000_000,
            end_date: 1_700_086_400_000,
            tickets_sold: 10,
            tickets_claimed: 9,
            mints_won: 8,
            positive_votes: 7,
            negative_votes: 6,
            total_mm_buy_amount: 5,
            total_mm_sell_amount: 4,
            last_mm_reward_date: 3,
            socials: vec![
                "site".to_string(),
                "x".to_string(),
                "tg".to_string(),
                String::new(),
            ],
            distribution: vec![10, 20, 30, 10, 10, 10, 10],
            flags: vec![],
            strings: vec![],
            keys: vec![Pubkey::new_unique(), Pubkey::new_unique()],
        }
    }

    #[test]
    fn test_launch_data_round_trip() {
        let launch = sample_launch();
        let bytes = to_bytes(&launch).unwrap();
        assert_eq!(bytes[0], 1, "account type leads");
        assert_eq!(bytes[1], 0, "raffle meta tag");

        let (decoded, consumed) = from_bytes::<LaunchData>(&bytes).unwrap();
        assert_eq!(decoded, launch);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn test_launch_data_ignores_account_padding() {
        let launch = sample_launch();
        let mut bytes = to_bytes(&launch).unwrap();
        let len = bytes.len();
        bytes.resize(len + 256, 0);

        let (decoded, consumed) = from_bytes::<LaunchData>(&bytes).unwrap();
        assert_eq!(decoded, launch);
        assert_eq!(consumed, len);
    }

    #[test]
    fn test_unknown_launch_meta_tag() {
        let mut bytes = to_bytes(&sample_launch()).unwrap();
        bytes[1] = 3;
        assert_matches!(
            from_bytes::<LaunchData>(&bytes),
            Err(CodecError::Malformed {
                kind: ErrorKind::InvalidData,
                ..
            })
        );
    }

    #[test]
    fn test_unknown_plugin_tag() {
        assert_matches!(
            from_bytes::<LaunchPlugin>(&[1, 0, 0]),
            Err(CodecError::Malformed {
                kind: ErrorKind::InvalidData,
                ..
            })
        );
        assert_eq!(
            from_bytes_exact::<LaunchPlugin>(&[0, 0x10, 0x27]).unwrap(),
            LaunchPlugin::MintProbability { mint_prob: 10_000 }
        );
    }

    #[test]
    fn test_truncated_launch_data_fails() {
        let bytes = to_bytes(&sample_launch()).unwrap();
        assert!(from_bytes::<LaunchData>(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_launch_helpers() {
        let launch = sample_launch();
        assert_eq!(launch.social(Socials::Website), Some("site"));
        assert_eq!(launch.social(Socials::Discord), Some(""));
        assert_eq!(launch.distribution_share(Distribution::MMRewards), Some(30));
        assert_eq!(launch.distribution_total(), 100);
        assert_eq!(launch.key(LaunchKeys::TeamWallet), Some(&launch.keys[1]));
        assert_eq!(launch.key(LaunchKeys::MintAddress), None);
    }

    #[test]
    fn test_join_data_fixed_size() {
        let join = JoinData {
            account_type: AccountType::Join.into(),
            joiner_key: Pubkey::new_unique(),
            game_id: u64::MAX,
            num_tickets: 5,
            num_claimed_tickets: 2,
            num_winning_tickets: 1,
            ticket_status: 1,
        };
        let bytes = to_bytes(&join).unwrap();
        assert_eq!(bytes.len(), JoinData::LEN);
        assert_eq!(from_bytes_exact::<JoinData>(&bytes).unwrap(), join);
    }

    #[test]
    fn test_user_data_with_empty_stats() {
        let user = UserData {
            account_type: AccountType::User.into(),
            user_key: Pubkey::new_unique(),
            user_name: String::new(),
            total_points: 0,
            votes: vec![],
            stats: UserStats::default(),
        };
        let bytes = to_bytes(&user).unwrap();
        assert_eq!(bytes.len(), 1 + 32 + 4 + 4 + 4 + 16);
        assert_eq!(from_bytes_exact::<UserData>(&bytes).unwrap(), user);
    }

    #[test]
    fn test_account_type_conversions() {
        for tag in 0u8..=10 {
            let account_type = AccountType::try_from(tag).unwrap();
            assert_eq!(u8::from(account_type), tag);
        }
        assert_matches!(
            AccountType::try_from(11),
            Err(CodecError::UnknownAccountType { tag: 11 })
        );
    }

    #[test]
    fn test_preview_from_user_input() {
        let input = LaunchDataUserInput {
            name: "Cook".to_string(),
            symbol: "COOK".to_string(),
            page_name: "cook".to_string(),
            web_url: "site".to_string(),
            twt_url: "x".to_string(),
            tele_url: "tg".to_string(),
            disc_url: "dc".to_string(),
            total_supply: 1_000_000,
            decimals: 6,
            num_mints: 100,
            ticket_price: 50_000_000,
            distribution: vec![50, 50, 0, 0, 0, 0, 0],
            open_date: 1,
            close_date: 2,
            ..Default::default()
        };
        let preview = LaunchData::preview(&input).unwrap();
        assert_eq!(preview.account_type, AccountType::Launch as u8);
        assert_eq!(preview.launch_meta, LaunchMeta::Raffle);
        assert!(preview.plugins.is_empty());
        assert_eq!(preview.socials, vec!["site", "x", "tg", "dc"]);
        assert_eq!(preview.decimals, 6);
        assert_eq!(preview.launch_date, 1);
        assert_eq!(preview.distribution_total(), 100);

        let too_many_decimals = LaunchDataUserInput {
            decimals: 300,
            ..input
        };
        assert_matches!(
            LaunchData::preview(&too_many_decimals),
            Err(CodecError::ValueOutOfRange {
                field: "decimals",
                value: 300,
                max: 255
            })
        );
    }
}
