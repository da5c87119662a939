//! The signed-in wallet session.
//!
//! The source of truth for "who is asking" on every page. Held as an
//! explicit value passed down by the embedding application; the host is
//! free to persist the serialized form (a cookie, local storage) between
//! visits.

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};

/// Which side of the marketplace the wallet is browsing as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Creator,
    User,
}

/// A signed-in wallet plus its chosen role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(with = "pubkey_base58")]
    pub wallet: Pubkey,
    pub role: Role,
}

impl Session {
    pub fn new(wallet: Pubkey, role: Role) -> Self {
        Self { wallet, role }
    }

    pub fn is_creator(&self) -> bool {
        self.role == Role::Creator
    }
}

mod pubkey_base58 {
    use std::str::FromStr;

    use anchor_lang::prelude::Pubkey;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let session = Session::new(Pubkey::new_unique(), Role::Creator);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }

    #[test]
    fn wallet_serializes_as_base58() {
        let wallet = Pubkey::new_unique();
        let session = Session::new(wallet, Role::User);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["wallet"], wallet.to_string());
        assert_eq!(value["role"], "user");
    }
}
