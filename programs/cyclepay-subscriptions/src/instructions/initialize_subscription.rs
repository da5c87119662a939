use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::error::SubscriptionError;
use crate::state::{GlobalStats, Plan, Subscription, VAULT_SEED};

/// Creates a subscription to one tier of a plan
///
/// The caller supplies a fresh random 8-byte seed so that repeated
/// subscriptions by the same payer derive distinct addresses. The chosen
/// tier's price and period are locked into the subscription, the escrow
/// vault is created, and `prefund_amount` is moved into it. The first
/// payment becomes due one billing period from now.
///
/// # Security
/// The `receiver` account MUST match `plan.receiver`; it is recorded on the
/// subscription and every later payment is validated against it, so a wrong
/// receiver here would permanently misdirect funds.
pub fn initialize_subscription(
    ctx: Context<InitializeSubscription>,
    tier_name: String,
    unique_seed: [u8; 8],
    prefund_amount: u64,
    auto_renew: bool,
) -> Result<()> {
    let plan = &ctx.accounts.plan;
    require!(
        ctx.accounts.payer.key() != plan.creator,
        SubscriptionError::CannotSubscribeToSelf
    );

    let tier = plan
        .tiers
        .iter()
        .find(|t| t.name == tier_name)
        .ok_or(SubscriptionError::TierNotFound)?;
    let amount = tier.amount;
    let period_seconds = tier.period_seconds;

    let clock = Clock::get()?;
    let next_payment_ts = clock
        .unix_timestamp
        .checked_add(period_seconds)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;

    // Move the prefund into the escrow vault
    if prefund_amount > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.payer_token_account.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
            authority: ctx.accounts.payer.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
        );
        token::transfer(cpi_ctx, prefund_amount)?;
    }

    let subscription = &mut ctx.accounts.subscription;
    subscription.payer = ctx.accounts.payer.key();
    subscription.receiver = ctx.accounts.receiver.key();
    subscription.mint = plan.mint;
    subscription.plan = plan.key();
    subscription.tier_name = tier_name.clone();
    subscription.amount = amount;
    subscription.period_seconds = period_seconds;
    subscription.next_payment_ts = next_payment_ts;
    subscription.active = true;
    subscription.auto_renew = auto_renew;
    subscription.vault = ctx.accounts.vault.key();
    subscription.unique_seed = unique_seed;
    subscription.started_at = clock.unix_timestamp;
    subscription.bump = ctx.bumps.subscription;
    subscription.vault_bump = ctx.bumps.vault;

    let stats = &mut ctx.accounts.global_stats;
    stats.total_subscriptions = stats
        .total_subscriptions
        .checked_add(1)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;
    stats.active_subscriptions = stats
        .active_subscriptions
        .checked_add(1)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;

    emit!(SubscriptionCreated {
        subscription: subscription.key(),
        plan: plan.key(),
        payer: subscription.payer,
        receiver: subscription.receiver,
        tier_name,
        amount,
        period_seconds,
        auto_renew,
        prefund: prefund_amount,
        next_payment_ts,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(tier_name: String, unique_seed: [u8; 8])]
pub struct InitializeSubscription<'info> {
    /// The user subscribing to the plan
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The plan being subscribed to
    #[account(
        seeds = [Plan::SEED_PREFIX, plan.creator.as_ref()],
        bump = plan.bump,
    )]
    pub plan: Account<'info, Plan>,

    /// Wallet that will receive the payments
    /// SECURITY: validated against the plan so payments cannot be locked
    /// onto an attacker-chosen wallet
    /// CHECK: recorded on the subscription, never written
    #[account(
        address = plan.receiver @ SubscriptionError::InvalidReceiverAccount
    )]
    pub receiver: UncheckedAccount<'info>,

    /// Mint the plan is priced in
    #[account(
        address = plan.mint @ SubscriptionError::MintMismatch
    )]
    pub mint: Account<'info, Mint>,

    /// The payer's token account funding the prefund
    #[account(
        mut,
        constraint = payer_token_account.mint == plan.mint @ SubscriptionError::MintMismatch,
        constraint = payer_token_account.owner == payer.key() @ SubscriptionError::Unauthorized,
    )]
    pub payer_token_account: Account<'info, TokenAccount>,

    /// The subscription record
    #[account(
        init,
        payer = payer,
        space = 8 + Subscription::INIT_SPACE,
        seeds = [
            Subscription::SEED_PREFIX,
            payer.key().as_ref(),
            unique_seed.as_ref()
        ],
        bump,
    )]
    pub subscription: Account<'info, Subscription>,

    /// Escrow token account holding the prefunded balance, owned by itself
    #[account(
        init,
        payer = payer,
        token::mint = mint,
        token::authority = vault,
        seeds = [VAULT_SEED, subscription.key().as_ref()],
        bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Program-wide counters
    #[account(
        mut,
        seeds = [GlobalStats::SEED_PREFIX],
        bump = global_stats.bump,
    )]
    pub global_stats: Account<'info, GlobalStats>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct SubscriptionCreated {
    pub subscription: Pubkey,
    pub plan: Pubkey,
    pub payer: Pubkey,
    pub receiver: Pubkey,
    pub tier_name: String,
    pub amount: u64,
    pub period_seconds: i64,
    pub auto_renew: bool,
    pub prefund: u64,
    pub next_payment_ts: i64,
    pub timestamp: i64,
}
