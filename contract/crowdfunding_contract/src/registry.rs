//! Campaign registry: creation, validation and read access.
//!
//! Campaigns live in persistent storage under sequential ids starting at 0 and
//! are never removed. `total_raised` and `finished` are the only fields that
//! change after creation, and only through the accounting functions below,
//! which are reserved for the pledge ledger.

use soroban_sdk::{log, Address, Env, String};

use crate::events::{self, CampaignCreatedEvent};
use crate::storage_types::{
    Campaign, CampaignId, CampaignPhase, Config, CrowdfundingError, DataKey, PersistentKey,
    MAX_CAMPAIGNS, TTL_INSTANCE, TTL_PERSISTENT,
};

/// Stores the configuration. Runs once per contract instance.
pub fn initialize(e: &Env, config: &Config) -> Result<(), CrowdfundingError> {
    if e.storage().instance().has(&DataKey::Config) {
        return Err(CrowdfundingError::AlreadyInitialized);
    }

    let this = e.current_contract_address();
    if config.token == this || config.owner == this || config.owner == config.token {
        return Err(CrowdfundingError::InvalidConfiguration);
    }

    e.storage().instance().set(&DataKey::Config, config);
    e.storage().instance().set(&DataKey::CampaignCount, &0u32);
    extend_instance(e);

    Ok(())
}

pub fn config(e: &Env) -> Result<Config, CrowdfundingError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CrowdfundingError::NotInitialized)
}

/// Fails with `Unauthorized` unless `caller` is the configured owner.
pub fn require_owner(e: &Env, caller: &Address) -> Result<Config, CrowdfundingError> {
    let config = config(e)?;
    if *caller != config.owner {
        return Err(CrowdfundingError::Unauthorized);
    }
    Ok(config)
}

pub fn count(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

/// Appends a new campaign and returns its id.
pub fn create(
    e: &Env,
    caller: &Address,
    funding_goal: i128,
    start_time: u64,
    end_time: u64,
    name: String,
    description: String,
) -> Result<CampaignId, CrowdfundingError> {
    require_owner(e, caller)?;

    if funding_goal <= 0 {
        return Err(CrowdfundingError::InvalidGoal);
    }
    if start_time >= end_time {
        return Err(CrowdfundingError::InvalidWindow);
    }

    let id = count(e);
    if id >= MAX_CAMPAIGNS {
        return Err(CrowdfundingError::CapacityExceeded);
    }

    let campaign = Campaign {
        id,
        finished: false,
        funding_goal,
        total_raised: 0,
        start_time,
        end_time,
        name,
        description,
    };
    save(e, &campaign);

    e.storage().instance().set(&DataKey::CampaignCount, &(id + 1));
    extend_instance(e);

    events::emit_campaign_created(
        e,
        CampaignCreatedEvent {
            campaign_id: id,
            funding_goal,
            start_time,
            end_time,
        },
    );
    log!(e, "campaign created: id={}, goal={}", id, funding_goal);
    Ok(id)
}

pub fn get(e: &Env, id: CampaignId) -> Result<Campaign, CrowdfundingError> {
    if id >= count(e) {
        return Err(CrowdfundingError::NotFound);
    }
    e.storage()
        .persistent()
        .get(&PersistentKey::Campaign(id))
        .ok_or(CrowdfundingError::NotFound)
}

/// Lazily walks all campaigns in insertion order. Each call starts over.
///
/// Every id below the count must resolve; a missing entry is yielded as an
/// error and ends the walk.
pub fn iter(e: &Env) -> CampaignIter {
    CampaignIter {
        env: e.clone(),
        next: 0,
        end: count(e),
    }
}

pub struct CampaignIter {
    env: Env,
    next: CampaignId,
    end: CampaignId,
}

impl Iterator for CampaignIter {
    type Item = Result<(CampaignId, Campaign), CrowdfundingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let id = self.next;
        match get(&self.env, id) {
            Ok(campaign) => {
                self.next += 1;
                Some(Ok((id, campaign)))
            }
            Err(err) => {
                self.next = self.end;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

// Accounting API, reserved for the pledge ledger.

pub(crate) fn record_raise(
    e: &Env,
    id: CampaignId,
    amount: i128,
) -> Result<Campaign, CrowdfundingError> {
    let mut campaign = get(e, id)?;
    campaign.total_raised = campaign
        .total_raised
        .checked_add(amount)
        .ok_or(CrowdfundingError::Overflow)?;
    save(e, &campaign);
    Ok(campaign)
}

/// Compensates a `record_raise` whose transfer did not go through.
pub(crate) fn revert_raise(
    e: &Env,
    id: CampaignId,
    amount: i128,
) -> Result<Campaign, CrowdfundingError> {
    let mut campaign = get(e, id)?;
    campaign.total_raised = campaign
        .total_raised
        .checked_sub(amount)
        .ok_or(CrowdfundingError::Overflow)?;
    save(e, &campaign);
    Ok(campaign)
}

pub(crate) fn mark_finished(e: &Env, id: CampaignId) -> Result<Campaign, CrowdfundingError> {
    let mut campaign = get(e, id)?;
    if campaign.finished {
        return Err(CrowdfundingError::AlreadyFinished);
    }
    campaign.finished = true;
    save(e, &campaign);
    Ok(campaign)
}

/// Undoes `mark_finished` within the same failed withdrawal.
pub(crate) fn revert_finished(e: &Env, id: CampaignId) -> Result<(), CrowdfundingError> {
    let mut campaign = get(e, id)?;
    campaign.finished = false;
    save(e, &campaign);
    Ok(())
}

// Evaluation helpers

pub fn is_active(campaign: &Campaign, now: u64) -> bool {
    now >= campaign.start_time && now < campaign.end_time
}

pub fn is_ended(campaign: &Campaign, now: u64) -> bool {
    now >= campaign.end_time
}

pub fn goal_met(campaign: &Campaign) -> bool {
    campaign.total_raised >= campaign.funding_goal
}

pub fn phase(campaign: &Campaign, now: u64) -> CampaignPhase {
    if is_ended(campaign, now) {
        CampaignPhase::Ended
    } else if is_active(campaign, now) {
        CampaignPhase::Active
    } else {
        CampaignPhase::Pending
    }
}

fn save(e: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    e.storage().persistent().set(&key, campaign);
    extend_persistent(e, &key);
}

pub(crate) fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

pub(crate) fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}
