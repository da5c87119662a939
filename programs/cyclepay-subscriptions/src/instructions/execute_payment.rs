use anchor_lang::{prelude::*, solana_program::instruction::Instruction, InstructionData};
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use tuktuk_program::{
    compile_transaction, RunTaskReturnV0, TaskReturnV0, TransactionSourceV0, TriggerV0,
};

use crate::error::SubscriptionError;
use crate::state::{GlobalStats, Subscription, VAULT_SEED};
use crate::utils::format_period;

/// Executes one due subscription payment (crank operation)
///
/// Callable by anyone once `next_payment_ts` has passed: the task-queue
/// runtime for auto-renewing subscriptions, or any wallet for a manual
/// retry. On success the locked amount moves from the vault to the
/// receiver's token account and the due timestamp advances one period.
/// When the vault cannot cover the price the subscription is suspended
/// instead, and no follow-up task is returned.
///
/// # Security
/// The `receiver` account is validated against `subscription.receiver`, and
/// the receiver's token account against both the receiver and the locked
/// mint, so a crank caller cannot redirect funds.
pub fn execute_payment(ctx: Context<ExecutePayment>) -> Result<RunTaskReturnV0> {
    let clock = Clock::get()?;
    let subscription = &ctx.accounts.subscription;

    require!(subscription.active, SubscriptionError::SubscriptionNotActive);
    require!(
        clock.unix_timestamp >= subscription.next_payment_ts,
        SubscriptionError::PaymentNotDue
    );

    let subscription_key = subscription.key();
    let amount = subscription.amount;

    if ctx.accounts.vault.amount < amount {
        msg!("vault balance below subscription price, suspending");

        let subscription = &mut ctx.accounts.subscription;
        subscription.active = false;

        let stats = &mut ctx.accounts.global_stats;
        stats.active_subscriptions = stats.active_subscriptions.saturating_sub(1);

        emit!(PaymentFailed {
            subscription: subscription_key,
            payer: subscription.payer,
            amount,
            vault_balance: ctx.accounts.vault.amount,
            timestamp: clock.unix_timestamp,
        });

        // No follow-up task: the renewal chain ends here
        return Ok(RunTaskReturnV0 {
            tasks: vec![],
            accounts: vec![],
        });
    }

    // Pay the receiver out of the vault
    let vault_bump = subscription.vault_bump;
    let seeds = &[VAULT_SEED, subscription_key.as_ref(), &[vault_bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.receiver_token_account.to_account_info(),
        authority: ctx.accounts.vault.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)?;

    let subscription = &mut ctx.accounts.subscription;
    let next_payment_ts = subscription
        .next_payment_ts
        .checked_add(subscription.period_seconds)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;
    subscription.next_payment_ts = next_payment_ts;

    let stats = &mut ctx.accounts.global_stats;
    stats.payments_processed = stats
        .payments_processed
        .checked_add(1)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;
    stats.volume_processed = stats
        .volume_processed
        .checked_add(amount)
        .ok_or(SubscriptionError::ArithmeticOverflow)?;

    emit!(PaymentExecuted {
        subscription: subscription_key,
        payer: subscription.payer,
        receiver: subscription.receiver,
        amount,
        next_payment_ts,
        timestamp: clock.unix_timestamp,
    });

    if !subscription.auto_renew {
        return Ok(RunTaskReturnV0 {
            tasks: vec![],
            accounts: vec![],
        });
    }

    let period_seconds = subscription.period_seconds;
    let description = format!("renews in {}", format_period(period_seconds));
    let next_task = ctx.accounts.reschedule(next_payment_ts, description)?;

    Ok(next_task)
}

impl<'info> ExecutePayment<'info> {
    /// Compiles this same instruction as a follow-up task triggered at
    /// `timestamp`, continuing the renewal chain.
    fn reschedule(&self, timestamp: i64, description: String) -> Result<RunTaskReturnV0> {
        let instructions = vec![Instruction {
            program_id: crate::ID,
            accounts: crate::accounts::ExecutePayment {
                payer: self.payer.key(),
                receiver: self.receiver.key(),
                subscription: self.subscription.key(),
                vault: self.vault.key(),
                receiver_token_account: self.receiver_token_account.key(),
                global_stats: self.global_stats.key(),
                token_program: self.token_program.key(),
            }
            .to_account_metas(None),
            data: crate::instruction::ExecutePayment.data(),
        }];

        let (compiled_tx, _) = compile_transaction(instructions, vec![])?;

        Ok(RunTaskReturnV0 {
            tasks: vec![TaskReturnV0 {
                trigger: TriggerV0::Timestamp(timestamp),
                transaction: TransactionSourceV0::CompiledV0(compiled_tx),
                crank_reward: None,
                free_tasks: 1,
                description,
            }],
            accounts: vec![],
        })
    }
}

#[derive(Accounts)]
pub struct ExecutePayment<'info> {
    /// The subscription's payer
    /// CHECK: not required to sign; used for PDA derivation and validated
    /// against the subscription record
    #[account(
        address = subscription.payer @ SubscriptionError::Unauthorized
    )]
    pub payer: UncheckedAccount<'info>,

    /// The wallet being paid
    /// SECURITY: this MUST match `subscription.receiver` so a crank caller
    /// cannot substitute their own wallet
    /// CHECK: validated by the address constraint
    #[account(
        address = subscription.receiver @ SubscriptionError::InvalidReceiverAccount
    )]
    pub receiver: UncheckedAccount<'info>,

    /// The subscription being charged
    #[account(
        mut,
        seeds = [
            Subscription::SEED_PREFIX,
            payer.key().as_ref(),
            subscription.unique_seed.as_ref()
        ],
        bump = subscription.bump,
    )]
    pub subscription: Account<'info, Subscription>,

    /// The escrow vault funding the payment
    #[account(
        mut,
        seeds = [VAULT_SEED, subscription.key().as_ref()],
        bump = subscription.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// The receiver's token account
    #[account(
        mut,
        constraint = receiver_token_account.mint == subscription.mint @ SubscriptionError::MintMismatch,
        constraint = receiver_token_account.owner == receiver.key() @ SubscriptionError::InvalidReceiverAccount,
    )]
    pub receiver_token_account: Account<'info, TokenAccount>,

    /// Program-wide counters
    #[account(
        mut,
        seeds = [GlobalStats::SEED_PREFIX],
        bump = global_stats.bump,
    )]
    pub global_stats: Account<'info, GlobalStats>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct PaymentExecuted {
    pub subscription: Pubkey,
    pub payer: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
    pub next_payment_ts: i64,
    pub timestamp: i64,
}

#[event]
pub struct PaymentFailed {
    pub subscription: Pubkey,
    pub payer: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
    pub timestamp: i64,
}
