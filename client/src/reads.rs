//! Decoding and in-memory filtering of on-chain accounts.
//!
//! The RPC transport (account listing, caching, request dedup) is the
//! embedding application's concern; this module turns raw account bytes
//! into typed state and slices the result per view. No pagination: lists
//! come back in whatever order the account listing yielded.

use anchor_lang::{prelude::Pubkey, AccountDeserialize};
use cyclepay_subscriptions::state::{Plan, Subscription};

use crate::error::ClientError;
use crate::search::SearchFields;

/// Decodes a plan account, discriminator included.
pub fn decode_plan(data: &[u8]) -> Result<Plan, ClientError> {
    Plan::try_deserialize(&mut &data[..]).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Decodes a subscription account, discriminator included.
pub fn decode_subscription(data: &[u8]) -> Result<Subscription, ClientError> {
    Subscription::try_deserialize(&mut &data[..]).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Creator view: the subscriptions enrolled in one plan.
pub fn subscriptions_by_plan<'a>(
    subscriptions: &'a [(Pubkey, Subscription)],
    plan: &Pubkey,
) -> Vec<&'a (Pubkey, Subscription)> {
    subscriptions.iter().filter(|(_, s)| s.plan == *plan).collect()
}

/// Payer view: the subscriptions a wallet is paying for.
pub fn subscriptions_by_payer<'a>(
    subscriptions: &'a [(Pubkey, Subscription)],
    payer: &Pubkey,
) -> Vec<&'a (Pubkey, Subscription)> {
    subscriptions.iter().filter(|(_, s)| s.payer == *payer).collect()
}

impl SearchFields for Plan {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.name.clone(), self.token_symbol.clone()];
        fields.extend(self.tiers.iter().map(|t| t.name.clone()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use anchor_lang::AccountSerialize;
    use cyclepay_subscriptions::state::Tier;

    use super::*;
    use crate::search::filter_by_query;

    fn plan(name: &str) -> Plan {
        Plan {
            creator: Pubkey::new_unique(),
            receiver: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            name: name.to_string(),
            token_symbol: "USDC".to_string(),
            token_uri: "https://example.com/usdc.png".to_string(),
            tiers: vec![Tier {
                name: "Basic".to_string(),
                amount: 10,
                period_seconds: 2_592_000,
                description: "One seat".to_string(),
            }],
            created_at: 1_700_000_000,
            bump: 255,
        }
    }

    fn subscription(plan: Pubkey, payer: Pubkey) -> Subscription {
        Subscription {
            payer,
            receiver: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            plan,
            tier_name: "Basic".to_string(),
            amount: 10,
            period_seconds: 2_592_000,
            next_payment_ts: 1_702_592_000,
            active: true,
            auto_renew: false,
            vault: Pubkey::new_unique(),
            unique_seed: [3u8; 8],
            started_at: 1_700_000_000,
            bump: 254,
            vault_bump: 253,
        }
    }

    #[test]
    fn plan_round_trips_through_account_bytes() {
        let original = plan("Spotify");
        let mut bytes = Vec::new();
        original.try_serialize(&mut bytes).unwrap();

        let decoded = decode_plan(&bytes).unwrap();
        assert_eq!(decoded.name, "Spotify");
        assert_eq!(decoded.tiers.len(), 1);
        assert_eq!(decoded.tiers[0].amount, 10);
        assert_eq!(decoded.tiers[0].period_seconds, 2_592_000);
    }

    #[test]
    fn decoding_rejects_foreign_account_data() {
        let sub = subscription(Pubkey::new_unique(), Pubkey::new_unique());
        let mut bytes = Vec::new();
        sub.try_serialize(&mut bytes).unwrap();

        assert!(decode_plan(&bytes).is_err());
        assert!(decode_subscription(&bytes).is_ok());
    }

    #[test]
    fn view_filters_slice_by_plan_and_payer() {
        let plan_a = Pubkey::new_unique();
        let plan_b = Pubkey::new_unique();
        let payer = Pubkey::new_unique();

        let all = vec![
            (Pubkey::new_unique(), subscription(plan_a, payer)),
            (Pubkey::new_unique(), subscription(plan_b, payer)),
            (Pubkey::new_unique(), subscription(plan_a, Pubkey::new_unique())),
        ];

        assert_eq!(subscriptions_by_plan(&all, &plan_a).len(), 2);
        assert_eq!(subscriptions_by_plan(&all, &plan_b).len(), 1);
        assert_eq!(subscriptions_by_payer(&all, &payer).len(), 2);
    }

    #[test]
    fn plans_are_searchable_by_name_symbol_and_tier() {
        let plans = vec![plan("Spotify"), plan("Netflix")];
        assert_eq!(filter_by_query(&plans, "spot").len(), 1);
        assert_eq!(filter_by_query(&plans, "usdc").len(), 2);
        assert_eq!(filter_by_query(&plans, "basic").len(), 2);
        assert!(filter_by_query(&plans, "premium").is_empty());
    }
}
