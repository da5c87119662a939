//! Hand-off to the external task-queue runtime.
//!
//! For an auto-renewing subscription the dashboard queues the first
//! `execute_payment` run right after subscribing; from then on the program
//! itself returns the follow-up task on every successful payment. Without
//! auto-renew nothing is queued and renewals stay manual.

use anchor_lang::{
    prelude::Pubkey, solana_program::instruction::Instruction, InstructionData, ToAccountMetas,
};
use cyclepay_subscriptions::state::Subscription;
use tuktuk_program::{compile_transaction, TaskReturnV0, TransactionSourceV0, TriggerV0};

use crate::error::ClientError;
use crate::format_period;
use crate::pda;

/// Builds the first renewal task for a freshly initialized subscription.
///
/// Returns `None` when the subscription does not auto-renew. Otherwise the
/// task replays `execute_payment` at `next_payment_ts`, i.e. one billing
/// period after the subscription started.
pub fn renewal_task(
    subscription_address: &Pubkey,
    subscription: &Subscription,
    receiver_token_account: &Pubkey,
) -> Result<Option<TaskReturnV0>, ClientError> {
    if !subscription.auto_renew {
        return Ok(None);
    }

    let accounts = cyclepay_subscriptions::accounts::ExecutePayment {
        payer: subscription.payer,
        receiver: subscription.receiver,
        subscription: *subscription_address,
        vault: subscription.vault,
        receiver_token_account: *receiver_token_account,
        global_stats: pda::global_stats_address().0,
        token_program: anchor_spl::token::ID,
    };

    let instruction = Instruction {
        program_id: cyclepay_subscriptions::ID,
        accounts: accounts.to_account_metas(None),
        data: cyclepay_subscriptions::instruction::ExecutePayment.data(),
    };

    let (transaction, _) = compile_transaction(vec![instruction], vec![])
        .map_err(|e| ClientError::Scheduling(e.to_string()))?;

    Ok(Some(TaskReturnV0 {
        trigger: TriggerV0::Timestamp(subscription.next_payment_ts),
        transaction: TransactionSourceV0::CompiledV0(transaction),
        crank_reward: None,
        free_tasks: 1,
        description: format!("renews in {}", format_period(subscription.period_seconds)),
    }))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn subscription(auto_renew: bool, now: i64, period_seconds: i64) -> Subscription {
        Subscription {
            payer: Pubkey::new_unique(),
            receiver: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            plan: Pubkey::new_unique(),
            tier_name: "Basic".to_string(),
            amount: 10,
            period_seconds,
            next_payment_ts: now + period_seconds,
            active: true,
            auto_renew,
            vault: Pubkey::new_unique(),
            unique_seed: [9u8; 8],
            started_at: now,
            bump: 255,
            vault_bump: 254,
        }
    }

    #[test]
    fn no_task_without_auto_renew() {
        let now = Utc::now().timestamp();
        let state = subscription(false, now, 2_592_000);
        let task = renewal_task(&Pubkey::new_unique(), &state, &Pubkey::new_unique()).unwrap();
        assert!(task.is_none());
    }

    #[test]
    fn task_fires_one_billing_period_from_now() {
        let now = Utc::now().timestamp();
        let period = 2_592_000;
        let state = subscription(true, now, period);

        let task = renewal_task(&Pubkey::new_unique(), &state, &Pubkey::new_unique())
            .unwrap()
            .expect("auto-renew must schedule");

        match task.trigger {
            TriggerV0::Timestamp(ts) => {
                assert!((ts - now - period).abs() <= 5);
            }
            _ => panic!("expected a timestamp trigger"),
        }
        assert_eq!(task.description, "renews in 1 month");
    }
}
