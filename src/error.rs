// src/error.rs
// Error types for the calculator: protocol-level failures and domain errors

use serde::Serialize;
use thiserror::Error;

/// A structural failure detected before any handler runs
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("invalid parameter '{parameter}': {reason}")]
pub struct ValidationError {
    pub parameter: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(parameter: &str) -> Self {
        Self::new(parameter, "required parameter is missing")
    }
}

/// A mathematically undefined or unsafe computation.
///
/// Handlers raise these with `?`; the registry turns them into an error
/// [`Response`](crate::response::Response) so they never abort an invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Divisor cannot be zero")]
    ZeroDivisor,

    #[error("{0} cannot be zero")]
    Zero(&'static str),

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{0}")]
    OutOfDomain(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Matrix must be square to compute the {0}")]
    NotSquare(&'static str),

    #[error("Matrix is singular and has no inverse")]
    Singular,

    #[error("Input too large and would overflow (maximum is {limit})")]
    Overflow { limit: u64 },

    #[error("Result exceeds the safe integer range")]
    UnsafeInteger,

    #[error("Invalid interval: {0}")]
    InvalidInterval(&'static str),

    #[error("Function is undefined or infinite at x = {x}")]
    NonFinite { x: String },

    #[error("Derivative is near zero at x = {x}, cannot continue iterating")]
    DerivativeStalled { x: String },

    #[error("Function values at the interval endpoints have the same sign, root may not exist")]
    SameSign,

    #[error("{method} did not converge after {iterations} iterations (last estimate: {last})")]
    NotConverged {
        method: &'static str,
        iterations: u32,
        last: String,
    },
}

impl DomainError {
    pub fn out_of_domain(message: impl Into<String>) -> Self {
        DomainError::OutOfDomain(message.into())
    }
}

/// Main error type for the calculator library
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("duplicate operation registered: {0}")]
    DuplicateOperation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result using CalcError
pub type Result<T> = std::result::Result<T, CalcError>;

impl CalcError {
    /// Whether the failure belongs to the pre-handler (protocol) tier
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, CalcError::UnknownOperation(_) | CalcError::Validation(_))
    }
}
