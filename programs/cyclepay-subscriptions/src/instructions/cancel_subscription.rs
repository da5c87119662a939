use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};

use crate::error::SubscriptionError;
use crate::state::{GlobalStats, Subscription, VAULT_SEED};

/// Cancels a subscription, refunding the unspent prefund
///
/// Only the payer can cancel. The remaining vault balance goes back to the
/// payer's token account, then both the vault and the subscription record
/// are closed with rent returned to the payer.
pub fn cancel_subscription(ctx: Context<CancelSubscription>) -> Result<()> {
    let subscription_key = ctx.accounts.subscription.key();
    let vault_bump = ctx.accounts.subscription.vault_bump;
    let refund = ctx.accounts.vault.amount;

    let seeds = &[VAULT_SEED, subscription_key.as_ref(), &[vault_bump]];
    let signer_seeds = &[&seeds[..]];

    if refund > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.vault.to_account_info(),
            to: ctx.accounts.payer_token_account.to_account_info(),
            authority: ctx.accounts.vault.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        token::transfer(cpi_ctx, refund)?;
    }

    // Reclaim the vault's rent as well
    let cpi_accounts = CloseAccount {
        account: ctx.accounts.vault.to_account_info(),
        destination: ctx.accounts.payer.to_account_info(),
        authority: ctx.accounts.vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::close_account(cpi_ctx)?;

    let subscription = &ctx.accounts.subscription;
    if subscription.active {
        let stats = &mut ctx.accounts.global_stats;
        stats.active_subscriptions = stats.active_subscriptions.saturating_sub(1);
    }

    emit!(SubscriptionCancelled {
        subscription: subscription_key,
        plan: subscription.plan,
        payer: subscription.payer,
        refund,
        timestamp: Clock::get()?.unix_timestamp,
    });

    // Subscription account is closed and rent returned to the payer
    Ok(())
}

#[derive(Accounts)]
pub struct CancelSubscription<'info> {
    /// The payer cancelling their subscription
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The subscription being cancelled
    #[account(
        mut,
        close = payer,
        seeds = [
            Subscription::SEED_PREFIX,
            payer.key().as_ref(),
            subscription.unique_seed.as_ref()
        ],
        bump = subscription.bump,
        constraint = subscription.payer == payer.key() @ SubscriptionError::Unauthorized,
    )]
    pub subscription: Account<'info, Subscription>,

    /// The escrow vault being drained and closed
    #[account(
        mut,
        seeds = [VAULT_SEED, subscription.key().as_ref()],
        bump = subscription.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// The payer's token account receiving the refund
    #[account(
        mut,
        constraint = payer_token_account.mint == subscription.mint @ SubscriptionError::MintMismatch,
        constraint = payer_token_account.owner == payer.key() @ SubscriptionError::Unauthorized,
    )]
    pub payer_token_account: Account<'info, TokenAccount>,

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
pub struct SubscriptionCancelled {
    pub subscription: Pubkey,
    pub plan: Pubkey,
    pub payer: Pubkey,
    pub refund: u64,
    pub timestamp: i64,
}
