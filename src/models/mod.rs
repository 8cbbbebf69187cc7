//! Domain models for CIDR subnet tools.
//!
//! This module contains the core data structures and conversions:
//! - [`address`] - strict dotted-quad parsing and integer conversions
//! - [`CidrBlock`] - CIDR block with derived subnet arithmetic

pub mod address;
mod block;

// Re-export public types
pub use address::{address_from_u64, address_to_u64, parse_address, MAX_ADDRESS_VALUE};
pub use block::{CidrBlock, DEFAULT_ENUMERATION_LIMIT, MAX_PREFIX_LENGTH};
