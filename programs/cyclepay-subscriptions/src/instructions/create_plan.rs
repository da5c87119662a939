use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::error::SubscriptionError;
use crate::state::{GlobalStats, Plan, Tier, MAX_TIERS};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct TierArgs {
    pub name: String,
    pub amount: u64,
    pub period_seconds: i64,
    pub description: String,
}

/// Creates a creator's subscription plan
///
/// Each creator can hold exactly one plan: the PDA is derived from the
/// creator wallet alone, so a second `create_plan` fails on account
/// creation. The tier list is validated up front; token display metadata
/// (symbol, image URI) is resolved by the caller before submission.
pub fn create_plan(
    ctx: Context<CreatePlan>,
    name: String,
    token_symbol: String,
    token_uri: String,
    tiers: Vec<TierArgs>,
) -> Result<()> {
    require!(!name.is_empty(), SubscriptionError::InvalidName);
    require!(!tiers.is_empty(), SubscriptionError::NoTiers);
    require!(tiers.len() <= MAX_TIERS, SubscriptionError::TooManyTiers);

    let mut seen = BTreeSet::new();
    for tier in &tiers {
        require!(!tier.name.is_empty(), SubscriptionError::InvalidName);
        require!(tier.amount > 0, SubscriptionError::InvalidAmount);
        require!(tier.period_seconds > 0, SubscriptionError::InvalidPeriod);
        require!(
            seen.insert(tier.name.clone()),
            SubscriptionError::DuplicateTierName
        );
    }

    let clock = Clock::get()?;

    let plan = &mut ctx.accounts.plan;
    plan.creator = ctx.accounts.creator.key();
    plan.receiver = ctx.accounts.receiver.key();
    plan.mint = ctx.accounts.mint.key();
    plan.name = name.clone();
    plan.token_symbol = token_symbol;
    plan.token_uri = token_uri;
    plan.tiers = tiers
        .into_iter()
        .map(|t| Tier {
            name: t.name,
            amount: t.amount,
            period_seconds: t.period_seconds,
            description: t.description,
        })
        .collect();
    plan.created_at = clock.unix_timestamp;
    plan.bump = ctx.bumps.plan;

    let stats = &mut ctx.accounts.global_stats;
    stats.total_plans = stats
        .total_plans
        .checked_add(1)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;
    stats.active_plans = stats
        .active_plans
        .checked_add(1)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;

    emit!(PlanCreated {
        plan: plan.key(),
        creator: plan.creator,
        receiver: plan.receiver,
        mint: plan.mint,
        name,
        tier_count: plan.tiers.len() as u8,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreatePlan<'info> {
    /// The creator publishing the plan
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Wallet that will receive subscription payments
    /// CHECK: Any wallet the creator designates; recorded, never written
    pub receiver: UncheckedAccount<'info>,

    /// SPL mint the plan's tiers are priced in
    pub mint: Account<'info, Mint>,

    /// The plan account, one per creator
    #[account(
        init,
        payer = creator,
        space = 8 + Plan::INIT_SPACE,
        seeds = [Plan::SEED_PREFIX, creator.key().as_ref()],
        bump,
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
pub struct PlanCreated {
    pub plan: Pubkey,
    pub creator: Pubkey,
    pub receiver: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub tier_count: u8,
    pub timestamp: i64,
}
