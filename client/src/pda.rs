//! Deterministic address derivation.
//!
//! Thin wrappers over `Pubkey::find_program_address` with the program's
//! fixed seeds, so the dashboard and the program can never disagree on
//! where an account lives.

use anchor_lang::prelude::Pubkey;
use cyclepay_subscriptions::state::{GlobalStats, Plan, Subscription, VAULT_SEED};

/// A creator's plan address. One plan per creator: the creator wallet is
/// the only variable seed.
pub fn plan_address(creator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[Plan::SEED_PREFIX, creator.as_ref()],
        &cyclepay_subscriptions::ID,
    )
}

/// A subscription address for a payer and a random 8-byte disambiguator.
/// Fresh seeds keep repeated subscriptions by the same payer from
/// colliding.
pub fn subscription_address(payer: &Pubkey, unique_seed: &[u8; 8]) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[Subscription::SEED_PREFIX, payer.as_ref(), unique_seed],
        &cyclepay_subscriptions::ID,
    )
}

/// The escrow vault address for a subscription.
pub fn vault_address(subscription: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[VAULT_SEED, subscription.as_ref()],
        &cyclepay_subscriptions::ID,
    )
}

/// The singleton stats address.
pub fn global_stats_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GlobalStats::SEED_PREFIX], &cyclepay_subscriptions::ID)
}

/// Generates a fresh 8-byte subscription seed.
///
/// Hashes the wall clock with a process-local counter, so two calls never
/// return the same seed even within one timer tick.
pub fn fresh_unique_seed() -> [u8; 8] {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use anchor_lang::solana_program::hash::hash;

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    let mut input = [0u8; 24];
    input[..16].copy_from_slice(&nanos.to_le_bytes());
    input[16..].copy_from_slice(&count.to_le_bytes());

    let digest = hash(&input).to_bytes();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_address_is_a_pure_function_of_the_creator() {
        let creator = Pubkey::new_unique();
        assert_eq!(plan_address(&creator), plan_address(&creator));

        let other = Pubkey::new_unique();
        assert_ne!(plan_address(&creator).0, plan_address(&other).0);
    }

    #[test]
    fn subscription_address_depends_on_payer_and_seed() {
        let payer = Pubkey::new_unique();
        let seed = [7u8; 8];
        assert_eq!(
            subscription_address(&payer, &seed),
            subscription_address(&payer, &seed)
        );

        // Same payer, fresh seed: no collision
        let fresh = [8u8; 8];
        assert_ne!(
            subscription_address(&payer, &seed).0,
            subscription_address(&payer, &fresh).0
        );

        // Same seed, different payer: no collision
        let other = Pubkey::new_unique();
        assert_ne!(
            subscription_address(&payer, &seed).0,
            subscription_address(&other, &seed).0
        );
    }

    #[test]
    fn vault_addresses_are_distinct_per_subscription() {
        let payer = Pubkey::new_unique();
        let (a, _) = subscription_address(&payer, &[1u8; 8]);
        let (b, _) = subscription_address(&payer, &[2u8; 8]);
        assert_ne!(vault_address(&a).0, vault_address(&b).0);
        assert_eq!(vault_address(&a), vault_address(&a));
    }

    #[test]
    fn global_stats_is_a_singleton() {
        assert_eq!(global_stats_address(), global_stats_address());
    }

    #[test]
    fn fresh_seeds_give_the_same_payer_distinct_addresses() {
        let payer = Pubkey::new_unique();
        let a = fresh_unique_seed();
        let b = fresh_unique_seed();
        assert_ne!(a, b);
        assert_ne!(
            subscription_address(&payer, &a).0,
            subscription_address(&payer, &b).0
        );
    }
}
