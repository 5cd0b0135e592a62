#![no_std]


mod events;
mod ledger;
mod registry;
mod storage_types;
mod token;

pub use events::{CampaignCreatedEvent, ClaimedEvent, PledgedEvent, WithdrawnEvent};
pub use registry::{goal_met, is_active, is_ended, CampaignIter};
pub use storage_types::{
    Campaign, CampaignId, CampaignPhase, Config, CrowdfundingError, MAX_CAMPAIGNS,
};
pub use token::{LedgerToken, TokenCapability};

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

#[contract]
pub struct Crowdfunding;

#[contractimpl]
impl Crowdfunding {
    /// Bind the contract to its custody token and owner. Runs once.
    pub fn initialize(e: Env, token: Address, owner: Address) -> Result<(), CrowdfundingError> {
        owner.require_auth();
        registry::initialize(&e, &Config { owner, token })
    }

    /// Register a new campaign (owner only). Returns its sequential id.
    pub fn create_campaign(
        e: Env,
        caller: Address,
        funding_goal: i128,
        start_time: u64,
        end_time: u64,
        name: String,
        description: String,
    ) -> Result<CampaignId, CrowdfundingError> {
        caller.require_auth();
        registry::create(&e, &caller, funding_goal, start_time, end_time, name, description)
    }

    /// Pull `amount` from the contributor's allowance into an active campaign.
    ///
    /// The contributor must have approved this contract on the token first.
    /// Returns the contributor's cumulative pledge to the campaign.
    pub fn pledge(
        e: Env,
        contributor: Address,
        campaign_id: CampaignId,
        amount: i128,
    ) -> Result<i128, CrowdfundingError> {
        contributor.require_auth();
        let token = custody_token(&e)?;
        ledger::pledge(&e, &token, &contributor, campaign_id, amount)
    }

    /// Refund the contributor's pledge from a campaign that missed its goal.
    pub fn claim(
        e: Env,
        contributor: Address,
        campaign_id: CampaignId,
    ) -> Result<i128, CrowdfundingError> {
        contributor.require_auth();
        let token = custody_token(&e)?;
        ledger::claim(&e, &token, &contributor, campaign_id)
    }

    /// Withdraw the raise of a successful campaign to the owner, once.
    pub fn get_tokens(
        e: Env,
        caller: Address,
        campaign_id: CampaignId,
    ) -> Result<i128, CrowdfundingError> {
        caller.require_auth();
        let token = custody_token(&e)?;
        ledger::get_tokens(&e, &token, &caller, campaign_id)
    }

    /// View functions
    pub fn get_campaign(e: Env, campaign_id: CampaignId) -> Result<Campaign, CrowdfundingError> {
        registry::get(&e, campaign_id)
    }

    pub fn list_campaigns(e: Env) -> Result<Vec<(CampaignId, Campaign)>, CrowdfundingError> {
        let mut out = Vec::new(&e);
        for entry in registry::iter(&e) {
            out.push_back(entry?);
        }
        Ok(out)
    }

    pub fn campaign_count(e: Env) -> u32 {
        registry::count(&e)
    }

    pub fn campaign_phase(
        e: Env,
        campaign_id: CampaignId,
    ) -> Result<CampaignPhase, CrowdfundingError> {
        let campaign = registry::get(&e, campaign_id)?;
        Ok(registry::phase(&campaign, e.ledger().timestamp()))
    }

    pub fn pledged_amount(e: Env, contributor: Address, campaign_id: CampaignId) -> i128 {
        ledger::pledged_amount(&e, &contributor, campaign_id)
    }

    pub fn held_balance(e: Env) -> Result<i128, CrowdfundingError> {
        Ok(custody_token(&e)?.balance_held())
    }

    pub fn owner_address(e: Env) -> Result<Address, CrowdfundingError> {
        Ok(registry::config(&e)?.owner)
    }

    pub fn token_address(e: Env) -> Result<Address, CrowdfundingError> {
        Ok(registry::config(&e)?.token)
    }
}

fn custody_token(e: &Env) -> Result<LedgerToken, CrowdfundingError> {
    let config = registry::config(e)?;
    Ok(LedgerToken::new(e, &config.token))
}
