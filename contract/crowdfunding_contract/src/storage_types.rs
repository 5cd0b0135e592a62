use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    CampaignCount,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    Pledge(Address, CampaignId), // (contributor, campaign)
}

pub type CampaignId = u32;

/// Fixed at initialization, never changes afterwards.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Config {
    pub owner: Address,
    pub token: Address, // token contract custodying pledged funds
}

/// One fundraising round.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub finished: bool,       // set once, by the owner withdrawal
    pub funding_goal: i128,
    pub total_raised: i128,
    pub start_time: u64,      // inclusive
    pub end_time: u64,        // exclusive
    pub name: String,
    pub description: String,
}

/// Temporal phase of a campaign, derived from ledger time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum CampaignPhase {
    Pending,
    Active,
    Ended,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundingError {
    Unauthorized = 1,
    InvalidGoal = 2,
    InvalidWindow = 3,
    CapacityExceeded = 4,
    NotFound = 5,
    CampaignNotActive = 6,
    ZeroAmount = 7,
    TransferFailed = 8,
    CampaignNotEnded = 9,
    GoalWasMet = 10,
    GoalNotMet = 11,
    NothingToClaim = 12,
    AlreadyFinished = 13,
    InvalidConfiguration = 14,
    AlreadyInitialized = 15,
    NotInitialized = 16,
    Overflow = 17,
}

// Constants
pub const MAX_CAMPAIGNS: u32 = 25;
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
