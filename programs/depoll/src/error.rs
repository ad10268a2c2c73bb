use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("No active poll exists for this identity")]
    PollNotFound,
    #[msg("This identity already owns an active poll")]
    PollAlreadyExists,
    #[msg("invalid amount supplied")]
    InvalidPayment,
    #[msg("Proposal index is out of bounds")]
    InvalidIndex,
    #[msg("Cycle index is beyond the current open cycle")]
    InvalidCycle,
    #[msg("Caller is not allowed to perform this action")]
    Unauthorized,
    #[msg("Field exceeds its maximum length")]
    FieldTooLong,
    #[msg("Registry vault cannot pay out below its rent-exempt minimum")]
    InsufficientVaultBalance,
    #[msg("Arithmetic overflow")]
    Overflow,
}
