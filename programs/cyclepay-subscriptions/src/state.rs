use anchor_lang::prelude::*;

/// Seed for the per-subscription escrow token account. The vault is a plain
/// SPL token account (no state struct of its own), so the seed lives here
/// rather than on an `impl`.
pub const VAULT_SEED: &[u8] = b"vault";

/// Maximum number of tiers a plan may define
pub const MAX_TIERS: usize = 8;

/// A named price/period combination inside a plan
#[derive(AnchorSerialize, AnchorDeserialize, Clone, InitSpace)]
pub struct Tier {
    /// Tier display name, also the key a subscription locks onto
    #[max_len(32)]
    pub name: String,
    /// Price per billing period, in the smallest unit of the plan's mint
    pub amount: u64,
    /// Billing period in seconds
    pub period_seconds: i64,
    /// Free-text description shown to subscribers
    #[max_len(200)]
    pub description: String,
}

/// A creator's subscription offering
///
/// One plan per creator: the PDA is derived from the creator's wallet alone.
#[account]
#[derive(InitSpace)]
pub struct Plan {
    /// Wallet that created and administers the plan
    pub creator: Pubkey,
    /// Wallet that receives subscription payments
    pub receiver: Pubkey,
    /// SPL mint subscriptions are denominated in
    pub mint: Pubkey,
    /// Plan display name
    #[max_len(64)]
    pub name: String,
    /// Display symbol of the payment token, resolved off-chain
    #[max_len(16)]
    pub token_symbol: String,
    /// Display image URI of the payment token, resolved off-chain
    #[max_len(200)]
    pub token_uri: String,
    /// Ordered pricing tiers
    #[max_len(8)]
    pub tiers: Vec<Tier>,
    /// Timestamp the plan was created
    pub created_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

/// A payer's enrollment in one tier of a plan
///
/// The PDA is derived from the payer plus a caller-supplied random 8-byte
/// seed, so one payer can hold several subscriptions without colliding.
#[account]
#[derive(InitSpace)]
pub struct Subscription {
    /// Wallet paying for the subscription
    pub payer: Pubkey,
    /// Wallet receiving the payments, copied from the plan at subscribe time
    pub receiver: Pubkey,
    /// SPL mint payments are denominated in
    pub mint: Pubkey,
    /// The plan this subscription belongs to
    pub plan: Pubkey,
    /// Name of the tier chosen at subscribe time
    #[max_len(32)]
    pub tier_name: String,
    /// Price locked from the tier when the subscription was created
    pub amount: u64,
    /// Billing period locked from the tier when the subscription was created
    pub period_seconds: i64,
    /// Timestamp the next payment becomes due
    pub next_payment_ts: i64,
    /// Whether the subscription is currently active
    pub active: bool,
    /// Whether renewals should be rescheduled automatically
    pub auto_renew: bool,
    /// Escrow token account holding the prefunded balance
    pub vault: Pubkey,
    /// Random disambiguator, part of the PDA derivation
    pub unique_seed: [u8; 8],
    /// Timestamp the subscription started
    pub started_at: i64,
    /// PDA bump seed
    pub bump: u8,
    /// Bump seed of the vault token account PDA
    pub vault_bump: u8,
}

/// Singleton program-wide counters
#[account]
#[derive(InitSpace)]
pub struct GlobalStats {
    /// Plans ever created
    pub total_plans: u64,
    /// Plans currently open
    pub active_plans: u64,
    /// Subscriptions ever created
    pub total_subscriptions: u64,
    /// Subscriptions currently active
    pub active_subscriptions: u64,
    /// Successful payment executions
    pub payments_processed: u64,
    /// Token volume moved by payment executions, in smallest units
    pub volume_processed: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Plan {
    pub const SEED_PREFIX: &'static [u8] = b"plan";
}

impl Subscription {
    pub const SEED_PREFIX: &'static [u8] = b"subscription";
}

impl GlobalStats {
    pub const SEED_PREFIX: &'static [u8] = b"global_stats";
}
