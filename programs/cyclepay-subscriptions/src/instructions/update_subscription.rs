use anchor_lang::prelude::*;

use crate::error::SubscriptionError;
use crate::state::{GlobalStats, Subscription};

/// A single-field patch to a subscription
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub enum SubscriptionUpdate {
    /// Toggle automatic rescheduling of renewals
    AutoRenew(bool),
    /// Activate or suspend the subscription
    Active(bool),
}

/// Patches one field of a subscription
///
/// Only the payer can update their subscription. The active counter in the
/// global stats tracks activations and suspensions.
pub fn update_subscription(
    ctx: Context<UpdateSubscription>,
    update: SubscriptionUpdate,
) -> Result<()> {
    let subscription = &mut ctx.accounts.subscription;
    let stats = &mut ctx.accounts.global_stats;

    match update {
        SubscriptionUpdate::AutoRenew(auto_renew) => {
            subscription.auto_renew = auto_renew;
        }
        SubscriptionUpdate::Active(active) => {
            if active && !subscription.active {
                stats.active_subscriptions = stats
                    .active_subscriptions
                    .checked_add(1)
                    .ok_or(SubscriptionError::ArithmeticOverflow)?;
            } else if !active && subscription.active {
                stats.active_subscriptions = stats.active_subscriptions.saturating_sub(1);
            }
            subscription.active = active;
        }
    }

    emit!(SubscriptionUpdated {
        subscription: subscription.key(),
        payer: subscription.payer,
        active: subscription.active,
        auto_renew: subscription.auto_renew,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateSubscription<'info> {
    /// The payer updating their subscription
    pub payer: Signer<'info>,

    /// The subscription being patched
    #[account(
        mut,
        seeds = [
            Subscription::SEED_PREFIX,
            payer.key().as_ref(),
            subscription.unique_seed.as_ref()
        ],
        bump = subscription.bump,
        constraint = subscription.payer == payer.key() @ SubscriptionError::Unauthorized,
    )]
    pub subscription: Account<'info, Subscription>,

    /// Program-wide counters
    #[account(
        mut,
        seeds = [GlobalStats::SEED_PREFIX],
        bump = global_stats.bump,
    )]
    pub global_stats: Account<'info, GlobalStats>,
}

#[event]
pub struct SubscriptionUpdated {
    pub subscription: Pubkey,
    pub payer: Pubkey,
    pub active: bool,
    pub auto_renew: bool,
    pub timestamp: i64,
}
