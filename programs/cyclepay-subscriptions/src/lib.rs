use anchor_lang::prelude::*;
use tuktuk_program::RunTaskReturnV0;

pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("BeYsrjPB7MTpj3Tncv2pUNRvXojiht5tCieo2663Qowz");

/// CyclePay Subscriptions Program
///
/// Handles the full subscription-payments lifecycle:
/// - Creator plans with named pricing tiers
/// - Subscriptions with a prefunded escrow vault per subscription
/// - Recurring payment execution, self-rescheduling through the task queue
/// - Program-wide counters
///
/// # Security Considerations
///
/// Every instruction that moves tokens to a receiver validates the
/// `receiver` account against the address recorded on the plan or
/// subscription. This prevents an attack where a caller passes their own
/// wallet as `receiver` while using a legitimate subscription, redirecting
/// payments away from the creator the payer subscribed to.
///
/// See `initialize_subscription.rs` and `execute_payment.rs` for the
/// constraint implementation.
#[program]
pub mod cyclepay_subscriptions {
    use super::*;

    /// Initialize the singleton program-wide stats account
    ///
    /// Permissionless, and only possible once.
    pub fn initialize_global_stats(ctx: Context<InitializeGlobalStats>) -> Result<()> {
        instructions::initialize_global_stats::initialize_global_stats(ctx)
    }

    /// Create a creator's subscription plan with its pricing tiers
    ///
    /// One plan per creator; the tier list must be non-empty with unique
    /// names, positive amounts and positive periods.
    pub fn create_plan(
        ctx: Context<CreatePlan>,
        name: String,
        token_symbol: String,
        token_uri: String,
        tiers: Vec<TierArgs>,
    ) -> Result<()> {
        instructions::create_plan::create_plan(ctx, name, token_symbol, token_uri, tiers)
    }

    /// Close a plan and reclaim its rent
    ///
    /// Only the creator can cancel. Outstanding subscriptions keep their
    /// locked terms.
    pub fn cancel_plan(ctx: Context<CancelPlan>) -> Result<()> {
        instructions::cancel_plan::cancel_plan(ctx)
    }

    /// Subscribe to one tier of a plan
    ///
    /// Locks the tier's terms, creates the escrow vault and moves the
    /// prefund into it. The `unique_seed` disambiguates repeated
    /// subscriptions by the same payer.
    ///
    /// # Security
    /// Validates `receiver` against `plan.receiver` so payments cannot be
    /// locked onto the wrong wallet.
    pub fn initialize_subscription(
        ctx: Context<InitializeSubscription>,
        tier_name: String,
        unique_seed: [u8; 8],
        prefund_amount: u64,
        auto_renew: bool,
    ) -> Result<()> {
        instructions::initialize_subscription::initialize_subscription(
            ctx,
            tier_name,
            unique_seed,
            prefund_amount,
            auto_renew,
        )
    }

    /// Top up a subscription's escrow vault
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::deposit(ctx, amount)
    }

    /// Cancel a subscription, refund the unspent prefund and close both the
    /// vault and the subscription record
    pub fn cancel_subscription(ctx: Context<CancelSubscription>) -> Result<()> {
        instructions::cancel_subscription::cancel_subscription(ctx)
    }

    /// Patch a single field of a subscription (auto-renew or active flag)
    pub fn update_subscription(
        ctx: Context<UpdateSubscription>,
        update: SubscriptionUpdate,
    ) -> Result<()> {
        instructions::update_subscription::update_subscription(ctx, update)
    }

    /// Execute one due payment (permissionless crank)
    ///
    /// Transfers the locked amount from the vault to the receiver and
    /// advances the due timestamp. For auto-renewing subscriptions the
    /// returned task re-queues this instruction at the new due timestamp.
    ///
    /// # Security
    /// Validates `receiver` against `subscription.receiver`.
    pub fn execute_payment(ctx: Context<ExecutePayment>) -> Result<RunTaskReturnV0> {
        instructions::execute_payment::execute_payment(ctx)
    }
}
