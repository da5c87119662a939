use anchor_lang::prelude::*;

use crate::error::SubscriptionError;
use crate::state::{GlobalStats, Plan};

/// Closes a creator's plan and reclaims its rent
///
/// Only the creator can cancel their plan. Outstanding subscriptions are
/// untouched: they carry their own locked copies of price, period and
/// receiver, so they keep paying out until individually cancelled.
pub fn cancel_plan(ctx: Context<CancelPlan>) -> Result<()> {
    let plan = &ctx.accounts.plan;

    let stats = &mut ctx.accounts.global_stats;
    stats.active_plans = stats.active_plans.saturating_sub(1);

    emit!(PlanCancelled {
        plan: plan.key(),
        creator: plan.creator,
        timestamp: Clock::get()?.unix_timestamp,
    });

    // Account is closed and rent returned to the creator
    Ok(())
}

#[derive(Accounts)]
pub struct CancelPlan<'info> {
    /// The creator cancelling their plan
    #[account(mut)]
    pub creator: Signer<'info>,

    /// The plan being closed
    #[account(
        mut,
        close = creator,
        seeds = [Plan::SEED_PREFIX, creator.key().as_ref()],
        bump = plan.bump,
        constraint = plan.creator == creator.key() @ SubscriptionError::Unauthorized,
    )]
    pub plan: Account<'info, Plan>,

    /// Program-wide counters
    #[account(
        mut,
        seeds = [GlobalStats::SEED_PREFIX],
        bump = global_stats.bump,
    )]
    pub global_stats: Account<'info, GlobalStats>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PlanCancelled {
    pub plan: Pubkey,
    pub creator: Pubkey,
    pub timestamp: i64,
}
