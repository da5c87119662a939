use anchor_lang::prelude::*;

use crate::state::GlobalStats;

/// Initializes the singleton program-wide stats account
///
/// Permissionless; the account can only be created once because the PDA is
/// derived from a fixed seed. All counters start at zero.
pub fn initialize_global_stats(ctx: Context<InitializeGlobalStats>) -> Result<()> {
    let stats = &mut ctx.accounts.global_stats;
    stats.total_plans = 0;
    stats.active_plans = 0;
    stats.total_subscriptions = 0;
    stats.active_subscriptions = 0;
    stats.payments_processed = 0;
    stats.volume_processed = 0;
    stats.bump = ctx.bumps.global_stats;

    emit!(GlobalStatsInitialized {
        payer: ctx.accounts.payer.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeGlobalStats<'info> {
    /// Wallet funding the stats account rent
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The singleton stats account
    #[account(
        init,
        payer = payer,
        space = 8 + GlobalStats::INIT_SPACE,
        seeds = [GlobalStats::SEED_PREFIX],
        bump,
    )]
    pub global_stats: Account<'info, GlobalStats>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct GlobalStatsInitialized {
    pub payer: Pubkey,
    pub timestamp: i64,
}
