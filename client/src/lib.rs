//! Off-chain client library for the CyclePay dashboard.
//!
//! Everything the dashboard does that is not a wallet signature lives here:
//! deterministic address derivation, decoding and filtering of on-chain
//! accounts, the REST mirror client, the renewal-scheduling hand-off, the
//! reusable search filter, and the session object scoping every query.

pub mod api;
pub mod error;
pub mod models;
pub mod pda;
pub mod reads;
pub mod scheduler;
pub mod search;
pub mod session;

pub use cyclepay_subscriptions::utils::format_period;
pub use error::ClientError;
pub use session::{Role, Session};
