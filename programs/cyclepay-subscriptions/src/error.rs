use anchor_lang::prelude::*;

#[error_code]
pub enum SubscriptionError {
    #[msg("Plan must define at least one tier")]
    NoTiers,

    #[msg("Plan defines more tiers than allowed")]
    TooManyTiers,

    #[msg("Name must not be empty")]
    InvalidName,

    #[msg("Tier names within a plan must be unique")]
    DuplicateTierName,

    #[msg("Tier amount must be greater than zero")]
    InvalidAmount,

    #[msg("Tier billing period must be greater than zero")]
    InvalidPeriod,

    #[msg("No tier with the requested name exists on this plan")]
    TierNotFound,

    #[msg("Cannot subscribe to your own plan")]
    CannotSubscribeToSelf,

    #[msg("Deposit amount must be greater than zero")]
    InvalidDepositAmount,

    #[msg("Subscription is not active")]
    SubscriptionNotActive,

    #[msg("Subscription payment is not yet due")]
    PaymentNotDue,

    #[msg("Invalid receiver account - does not match subscription receiver")]
    InvalidReceiverAccount,

    #[msg("Token account mint does not match the subscription mint")]
    MintMismatch,

    #[msg("Unauthorized - you are not the owner of this account")]
    Unauthorized,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
