//! IPv4 address parsing and integer conversions.
//!
//! Addresses are plain [`std::net::Ipv4Addr`] values; this module adds the
//! strict dotted-quad parser and the checked integer conversions the block
//! arithmetic is built on.

use crate::error::CidrError;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

/// Highest value an IPv4 address can take as an unsigned integer.
pub const MAX_ADDRESS_VALUE: u64 = 4_294_967_295;

lazy_static! {
    // Four bare decimal segments joined by dots. Anything else (signs, hex,
    // embedded whitespace, missing or extra segments) fails the match.
    static ref DOTTED_QUAD: Regex =
        Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").expect("Invalid Regex?");
}

/// Parse a dotted-quad address string.
///
/// Surrounding whitespace is trimmed. Each segment must be a bare decimal
/// number in 0-255.
///
/// # Examples
/// ```
/// use cidr_subnet_tools::parse_address;
/// let addr = parse_address("192.168.1.1").unwrap();
/// assert_eq!(u32::from(addr), 3232235777);
/// ```
pub fn parse_address(text: &str) -> Result<Ipv4Addr, CidrError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CidrError::Format("IP address cannot be empty".to_string()));
    }

    let caps = DOTTED_QUAD
        .captures(text)
        .ok_or_else(|| CidrError::Format(format!("invalid IP address: {text}")))?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        let part = &caps[i + 1];
        *octet = part.parse().map_err(|_| {
            CidrError::Format(format!("invalid IP octet: {part}, must be between 0 and 255"))
        })?;
    }

    Ok(Ipv4Addr::from(octets))
}

/// Convert an unsigned integer to an address, checking the 32-bit range.
pub fn address_from_u64(value: u64) -> Result<Ipv4Addr, CidrError> {
    if value > MAX_ADDRESS_VALUE {
        return Err(CidrError::Range(format!(
            "address value {value} must be between 0 and {MAX_ADDRESS_VALUE}"
        )));
    }
    Ok(Ipv4Addr::from(value as u32))
}

/// Widen an address into the u64 domain used for block-size arithmetic.
pub fn address_to_u64(addr: Ipv4Addr) -> u64 {
    u64::from(u32::from(addr))
}
