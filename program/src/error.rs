use solana_program::{decode_error::DecodeError, program_error::ProgramError};
use thiserror::Error;

/// Errors returned by the token vesting program and its client helpers.
///
/// Codes start at 0, like the custom codes of the system and token programs
/// this program invokes. A `Custom` code is only meaningful together with the
/// index of the failing instruction and the program that raised it, which the
/// transaction logs name.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum VestingError {
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// A fixed-width value did not have the expected width.
    #[error("Encoding error: value or buffer width mismatch")]
    EncodingError,

    #[error("Vesting account data is malformed")]
    MalformedAccountError,

    #[error("An account already exists at the vesting address")]
    AlreadyExists,

    #[error("Vesting contract is already initialized")]
    AlreadyInitialized,

    #[error("Source token account balance is insufficient")]
    InsufficientBalance,

    #[error("Token account mint does not match the vesting mint")]
    InvalidMint,

    #[error("New destination mint does not match the vesting mint")]
    MintMismatch,

    #[error("Signer is not allowed to perform this operation")]
    Unauthorized,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Seed does not derive the vesting address")]
    InvalidProgramAddress,

    #[error("Destination token account does not match the vesting contract")]
    InvalidDestination,

    #[error("Token program id is invalid")]
    InvalidTokenProgram,
}

impl From<VestingError> for ProgramError {
    fn from(e: VestingError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for VestingError {
    fn type_of() -> &'static str {
        "VestingError"
    }
}
