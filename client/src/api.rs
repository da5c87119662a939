//! REST client for the off-chain mirror backend.
//!
//! The backend keeps queryable copies of subscriptions plus the
//! notification and transaction history the chain does not expose
//! directly. Mirror writes are not atomic with the on-chain mutation they
//! follow: a failed write after a confirmed transaction leaves the two
//! stores diverged, and the error comes back to the caller instead of
//! being reconciled here.

use anchor_lang::prelude::Pubkey;

use crate::error::ClientError;
use crate::models::{
    Notification, SubscriptionPatch, SubscriptionRecord, TokenMetadata, TransactionRecord,
    UserRecord,
};

/// Resolves a token's display metadata (symbol, image) from its off-chain
/// metadata URI, as done once before submitting `create_plan`.
pub async fn resolve_token_metadata(uri: &str) -> Result<TokenMetadata, ClientError> {
    let response = checked(reqwest::get(uri).await?).await?;
    Ok(response.json().await?)
}

pub struct MirrorClient {
    http: reqwest::Client,
    base_url: String,
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

async fn checked(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Mirror {
            status: status.as_u16(),
            message,
        })
    }
}

impl MirrorClient {
    /// `base_url` is the backend origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// Transaction history of a wallet.
    pub async fn transactions_for_user(
        &self,
        user: &Pubkey,
    ) -> Result<Vec<TransactionRecord>, ClientError> {
        let url = self.url(&format!("/api/transactions/user/{user}"));
        let response = checked(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Notifications of a wallet.
    pub async fn notifications_for_user(
        &self,
        user: &Pubkey,
    ) -> Result<Vec<Notification>, ClientError> {
        let url = self.url(&format!("/api/notifications/user/{user}"));
        let response = checked(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Mirrors a freshly initialized subscription.
    pub async fn create_subscription(
        &self,
        record: &SubscriptionRecord,
    ) -> Result<(), ClientError> {
        let url = self.url("/api/subscriptions");
        checked(self.http.post(url).json(record).send().await?).await?;
        Ok(())
    }

    /// Patches the single changed field of a mirror row.
    pub async fn update_subscription(
        &self,
        subscription_pda: &Pubkey,
        patch: &SubscriptionPatch,
    ) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/subscriptions/{subscription_pda}"));
        checked(self.http.patch(url).json(patch).send().await?).await?;
        Ok(())
    }

    /// Removes the mirror row of a cancelled subscription.
    pub async fn delete_subscription(&self, subscription_pda: &Pubkey) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/subscriptions/{subscription_pda}"));
        checked(self.http.delete(url).send().await?).await?;
        Ok(())
    }

    /// Fetches the backend row of a wallet, creating it on first sight.
    pub async fn fetch_or_create_user(&self, address: &Pubkey) -> Result<UserRecord, ClientError> {
        let url = self.url(&format!("/api/user/{address}"));
        let response = checked(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/notifications/{id}/read"));
        checked(self.http.patch(url).send().await?).await?;
        Ok(())
    }

    pub async fn delete_notification(&self, id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/api/notifications/{id}"));
        checked(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_doubled_slashes() {
        assert_eq!(
            endpoint("http://localhost:3000", "/api/subscriptions"),
            "http://localhost:3000/api/subscriptions"
        );
        assert_eq!(
            endpoint("http://localhost:3000/", "/api/subscriptions"),
            "http://localhost:3000/api/subscriptions"
        );
    }

    #[test]
    fn user_scoped_paths_embed_the_base58_wallet() {
        let wallet = Pubkey::new_unique();
        let client = MirrorClient::new("http://localhost:3000");
        assert_eq!(
            client.url(&format!("/api/transactions/user/{wallet}")),
            format!("http://localhost:3000/api/transactions/user/{wallet}")
        );
    }
}
