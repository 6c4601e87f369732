//! CPF parsing errors.

use cadastro_shared::AppError;
use thiserror::Error;

/// Reasons a CPF is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpfError {
    /// The input does not contain exactly 11 digits.
    #[error("CPF must have 11 digits, got {0}")]
    WrongLength(usize),

    /// All 11 digits are the same (e.g. `111.111.111-11`).
    #[error("CPF digits cannot all be the same")]
    RepeatedDigits,

    /// A check digit does not match the computed one.
    #[error("CPF check digit {position} is {found}, expected {expected}")]
    CheckDigitMismatch {
        /// Which check digit failed: 1 or 2.
        position: usize,
        /// Digit computed from the preceding digits.
        expected: u8,
        /// Digit present in the input.
        found: u8,
    },
}

impl From<CpfError> for AppError {
    fn from(err: CpfError) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}
