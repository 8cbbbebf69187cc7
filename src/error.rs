//! Typed errors for address parsing and CIDR block arithmetic.

use thiserror::Error;

/// Errors surfaced by address and CIDR block operations.
///
/// Every error is detected at the offending call; a successfully constructed
/// address or block stays arithmetically well-formed for its whole lifetime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CidrError {
    /// Malformed dotted-quad or CIDR syntax.
    #[error("invalid format: {0}")]
    Format(String),

    /// A numeric component is outside its allowed range.
    #[error("value out of range: {0}")]
    Range(String),

    /// The operation is not defined for this block.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Enumeration would exceed the configured host ceiling.
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
}
