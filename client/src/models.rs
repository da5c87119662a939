//! Wire models for the REST mirror backend.
//!
//! Field names follow the backend's camelCase convention, with the
//! explicit `planName`/`tierName` spellings used throughout.

use anchor_lang::prelude::Pubkey;
use chrono::{DateTime, Utc};
use cyclepay_subscriptions::state::Subscription;
use serde::{Deserialize, Serialize};

use crate::search::SearchFields;

/// The off-chain mirror row of an on-chain subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    /// Base58 subscription address, the row key
    pub subscription_pda: String,
    /// Base58 payer wallet
    pub user: String,
    pub plan_name: String,
    pub tier_name: String,
    /// Locked price in smallest token units
    pub amount: u64,
    pub period_seconds: i64,
    pub next_payment_ts: i64,
    pub active: bool,
    pub auto_renew: bool,
    /// Base58 vault token-account address
    pub vault: String,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    /// Builds the mirror row for a freshly confirmed on-chain subscription.
    pub fn from_onchain(
        address: &Pubkey,
        state: &Subscription,
        plan_name: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subscription_pda: address.to_string(),
            user: state.payer.to_string(),
            plan_name: plan_name.to_string(),
            tier_name: state.tier_name.clone(),
            amount: state.amount,
            period_seconds: state.period_seconds,
            next_payment_ts: state.next_payment_ts,
            active: state.active,
            auto_renew: state.auto_renew,
            vault: state.vault.to_string(),
            created_at,
        }
    }
}

/// A single-field patch to a mirror row; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_payment_ts: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Base58 wallet the notification belongs to
    pub user: String,
    pub plan_name: String,
    pub tier_name: String,
    /// Base58 subscription address the notification refers to
    pub subscription_pda: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failure,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    /// Base58 wallet the transaction belongs to
    pub user: String,
    pub plan_name: String,
    pub tier_name: String,
    pub amount: u64,
    pub status: TransactionStatus,
    /// On-chain signature, absent for payments that never landed
    pub signature: Option<String>,
    pub subscription_pda: String,
    pub created_at: DateTime<Utc>,
}

/// Display metadata of a payment token, resolved from its off-chain
/// metadata URI before plan creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenMetadata {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A backend user row, created on first sight of a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl SearchFields for SubscriptionRecord {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.plan_name.clone(),
            self.tier_name.clone(),
            self.amount.to_string(),
        ]
    }
}

impl SearchFields for Notification {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.message.clone(),
            self.plan_name.clone(),
            self.tier_name.clone(),
        ]
    }
}

impl SearchFields for TransactionRecord {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.plan_name.clone(),
            self.tier_name.clone(),
            self.status.as_str().to_string(),
            self.amount.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_record_uses_camel_case_wire_names() {
        let record = SubscriptionRecord {
            subscription_pda: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".into(),
            user: "4Nd1mBQtrMJVYVfKf2Pjy9mekTw9iZ6QqnZpsj35ZdJF".into(),
            plan_name: "Spotify".into(),
            tier_name: "Basic".into(),
            amount: 10,
            period_seconds: 2_592_000,
            next_payment_ts: 1_700_000_000,
            active: true,
            auto_renew: true,
            vault: "7Y6dDdUkhkGWKtJmDhRUhSokosfxXc6MknfBBM4Ls2RU".into(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["planName"], "Spotify");
        assert_eq!(value["tierName"], "Basic");
        assert_eq!(value["subscriptionPda"], record.subscription_pda);
        assert_eq!(value["autoRenew"], true);
    }

    #[test]
    fn patch_serializes_only_the_changed_field() {
        let patch = SubscriptionPatch {
            auto_renew: Some(false),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "autoRenew": false }));
    }

    #[test]
    fn notification_kind_round_trips_lowercase() {
        for (kind, text) in [
            (NotificationKind::Error, "\"error\""),
            (NotificationKind::Success, "\"success\""),
            (NotificationKind::Warning, "\"warning\""),
            (NotificationKind::Info, "\"info\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), text);
            let back: NotificationKind = serde_json::from_str(text).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn mirror_row_carries_the_onchain_terms() {
        let address = Pubkey::new_unique();
        let state = Subscription {
            payer: Pubkey::new_unique(),
            receiver: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            plan: Pubkey::new_unique(),
            tier_name: "Basic".to_string(),
            amount: 10,
            period_seconds: 2_592_000,
            next_payment_ts: 1_702_592_000,
            active: true,
            auto_renew: true,
            vault: Pubkey::new_unique(),
            unique_seed: [5u8; 8],
            started_at: 1_700_000_000,
            bump: 255,
            vault_bump: 254,
        };

        let record = SubscriptionRecord::from_onchain(&address, &state, "Spotify", Utc::now());
        assert_eq!(record.subscription_pda, address.to_string());
        assert_eq!(record.user, state.payer.to_string());
        assert_eq!(record.plan_name, "Spotify");
        assert_eq!(record.tier_name, "Basic");
        assert_eq!(record.amount, 10);
        assert!(record.auto_renew);
    }

    #[test]
    fn token_metadata_tolerates_missing_optional_fields() {
        let meta: TokenMetadata = serde_json::from_str(r#"{"symbol":"USDC"}"#).unwrap();
        assert_eq!(meta.symbol, "USDC");
        assert!(meta.name.is_none());
        assert!(meta.image.is_none());
    }

    #[test]
    fn transaction_status_round_trips() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Failure).unwrap(),
            "\"failure\""
        );
        let back: TransactionStatus = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(back, TransactionStatus::Success);
    }
}
