// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision decimal operations
// ============================================================================

use std::fmt;

/// Errors that can occur during decimal arithmetic operations.
///
/// Every error is fatal to the operation that raised it: the destination is
/// left as zero and no partial result is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Divisor (or modulus) was zero, or zero was raised to a negative power
    DivisionByZero,
    /// Operand must not be negative (square root, exponent, shift count)
    Negative,
    /// Operand must be an integer (exponent, shift count, modexp operands)
    NonInteger,
    /// A computed size or machine-integer conversion exceeded its range
    Overflow,
    /// Limb storage could not be allocated
    AllocationFailure,
    /// Input string or base is invalid
    InvalidInput,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// The operation was cancelled by an interrupt
    Interrupted,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::Negative => write!(f, "negative number"),
            NumericError::NonInteger => write!(f, "non-integer number"),
            NumericError::Overflow => {
                write!(f, "number overflow: result cannot be represented")
            },
            NumericError::AllocationFailure => write!(f, "could not allocate memory"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::Interrupted => write!(f, "interrupted"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
