//! Pledge ledger: the three transitions that move value.
//!
//! Each transition updates internal accounting before it calls the token and
//! compensates if the transfer fails, so a call that re-enters the contract
//! from inside a transfer already observes the updated records.

use soroban_sdk::{log, Address, Env};

use crate::events::{self, ClaimedEvent, PledgedEvent, WithdrawnEvent};
use crate::registry;
use crate::storage_types::{CampaignId, CrowdfundingError, PersistentKey};
use crate::token::TokenCapability;

/// Amount `contributor` has pledged to `campaign_id` and not yet claimed back.
pub fn pledged_amount(e: &Env, contributor: &Address, campaign_id: CampaignId) -> i128 {
    e.storage()
        .persistent()
        .get(&PersistentKey::Pledge(contributor.clone(), campaign_id))
        .unwrap_or(0)
}

/// Commits `amount` from `contributor` to an active campaign.
///
/// Returns the contributor's cumulative pledge to the campaign.
pub fn pledge<T: TokenCapability>(
    e: &Env,
    token: &T,
    contributor: &Address,
    campaign_id: CampaignId,
    amount: i128,
) -> Result<i128, CrowdfundingError> {
    let campaign = registry::get(e, campaign_id)?;
    if amount <= 0 {
        return Err(CrowdfundingError::ZeroAmount);
    }
    if !registry::is_active(&campaign, e.ledger().timestamp()) {
        return Err(CrowdfundingError::CampaignNotActive);
    }

    adjust_pledge(e, contributor, campaign_id, amount)?;
    if let Err(err) = registry::record_raise(e, campaign_id, amount) {
        adjust_pledge(e, contributor, campaign_id, -amount)?;
        return Err(err);
    }

    if let Err(err) = token.transfer_in(contributor, amount) {
        adjust_pledge(e, contributor, campaign_id, -amount)?;
        registry::revert_raise(e, campaign_id, amount)?;
        log!(e, "pledge rejected by token: campaign={}", campaign_id);
        return Err(err);
    }

    let total_raised = registry::get(e, campaign_id)?.total_raised;
    events::emit_pledged(
        e,
        PledgedEvent {
            campaign_id,
            contributor: contributor.clone(),
            amount,
            total_raised,
        },
    );
    log!(e, "pledged: campaign={}, amount={}", campaign_id, amount);

    Ok(pledged_amount(e, contributor, campaign_id))
}

/// Refunds a contributor's whole pledge to a campaign that ended short of its goal.
pub fn claim<T: TokenCapability>(
    e: &Env,
    token: &T,
    contributor: &Address,
    campaign_id: CampaignId,
) -> Result<i128, CrowdfundingError> {
    let campaign = registry::get(e, campaign_id)?;
    if !registry::is_ended(&campaign, e.ledger().timestamp()) {
        return Err(CrowdfundingError::CampaignNotEnded);
    }
    if registry::goal_met(&campaign) {
        return Err(CrowdfundingError::GoalWasMet);
    }

    let amount = pledged_amount(e, contributor, campaign_id);
    if amount <= 0 {
        return Err(CrowdfundingError::NothingToClaim);
    }

    set_pledge(e, contributor, campaign_id, 0);
    if let Err(err) = token.transfer_out(contributor, amount) {
        adjust_pledge(e, contributor, campaign_id, amount)?;
        log!(e, "refund rejected by token: campaign={}", campaign_id);
        return Err(err);
    }

    events::emit_claimed(
        e,
        ClaimedEvent {
            campaign_id,
            contributor: contributor.clone(),
            amount,
        },
    );
    log!(e, "claimed: campaign={}, amount={}", campaign_id, amount);

    Ok(amount)
}

/// Releases everything a successful campaign raised to the owner, once.
///
/// Pledge records are left as they are; `finished` alone guards this path.
pub fn get_tokens<T: TokenCapability>(
    e: &Env,
    token: &T,
    caller: &Address,
    campaign_id: CampaignId,
) -> Result<i128, CrowdfundingError> {
    let config = registry::require_owner(e, caller)?;
    let campaign = registry::get(e, campaign_id)?;
    if !registry::is_ended(&campaign, e.ledger().timestamp()) {
        return Err(CrowdfundingError::CampaignNotEnded);
    }
    if !registry::goal_met(&campaign) {
        return Err(CrowdfundingError::GoalNotMet);
    }
    if campaign.finished {
        return Err(CrowdfundingError::AlreadyFinished);
    }

    let campaign = registry::mark_finished(e, campaign_id)?;
    let amount = campaign.total_raised;
    if let Err(err) = token.transfer_out(&config.owner, amount) {
        registry::revert_finished(e, campaign_id)?;
        log!(e, "withdrawal rejected by token: campaign={}", campaign_id);
        return Err(err);
    }

    events::emit_withdrawn(
        e,
        WithdrawnEvent {
            campaign_id,
            owner: config.owner,
            amount,
        },
    );
    log!(e, "withdrawn: campaign={}, amount={}", campaign_id, amount);

    Ok(amount)
}

fn set_pledge(e: &Env, contributor: &Address, campaign_id: CampaignId, amount: i128) {
    let key = PersistentKey::Pledge(contributor.clone(), campaign_id);
    e.storage().persistent().set(&key, &amount);
    registry::extend_persistent(e, &key);
}

fn adjust_pledge(
    e: &Env,
    contributor: &Address,
    campaign_id: CampaignId,
    delta: i128,
) -> Result<i128, CrowdfundingError> {
    let updated = pledged_amount(e, contributor, campaign_id)
        .checked_add(delta)
        .ok_or(CrowdfundingError::Overflow)?;
    set_pledge(e, contributor, campaign_id, updated);
    Ok(updated)
}
