use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::SubscriptionError;
use crate::state::{Subscription, VAULT_SEED};

/// Tops up a subscription's escrow vault
///
/// Only the subscription's payer can deposit. Renewals draw from the vault,
/// so topping up is how a payer keeps auto-renew alive.
pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    require!(amount > 0, SubscriptionError::InvalidDepositAmount);

    let cpi_accounts = Transfer {
        from: ctx.accounts.payer_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.payer.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    emit!(VaultFunded {
        subscription: ctx.accounts.subscription.key(),
        payer: ctx.accounts.payer.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    /// The payer topping up their vault
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The subscription whose vault is funded
    #[account(
        seeds = [
            Subscription::SEED_PREFIX,
            payer.key().as_ref(),
            subscription.unique_seed.as_ref()
        ],
        bump = subscription.bump,
        constraint = subscription.payer == payer.key() @ SubscriptionError::Unauthorized,
    )]
    pub subscription: Account<'info, Subscription>,

    /// The escrow vault
    #[account(
        mut,
        seeds = [VAULT_SEED, subscription.key().as_ref()],
        bump = subscription.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// The payer's token account funding the deposit
    #[account(
        mut,
        constraint = payer_token_account.mint == subscription.mint @ SubscriptionError::MintMismatch,
        constraint = payer_token_account.owner == payer.key() @ SubscriptionError::Unauthorized,
    )]
    pub payer_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct VaultFunded {
    pub subscription: Pubkey,
    pub payer: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
