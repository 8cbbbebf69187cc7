//! CIDR block arithmetic.
//!
//! [`CidrBlock`] pairs an address with a prefix length. The stored address is
//! kept exactly as supplied; every derived value is computed against the
//! network address, so an un-normalized block behaves the same as its
//! normalized form.

use crate::error::CidrError;
use crate::models::address::{address_to_u64, parse_address};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum prefix length for an IPv4 CIDR block.
pub const MAX_PREFIX_LENGTH: u8 = 32;

/// Conventional ceiling for host enumeration.
///
/// [`CidrBlock::usable_addresses`] takes the ceiling as a parameter so callers
/// can tune it; this is the value the demo and tests pass.
pub const DEFAULT_ENUMERATION_LIMIT: u64 = 1024;

lazy_static! {
    // Bare decimal prefix. Signs, whitespace and trailing junk fail the match.
    static ref PREFIX_DIGITS: Regex = Regex::new(r"^\d{1,3}$").expect("Invalid Regex?");
}

/// A CIDR block: a contiguous power-of-two range of IPv4 addresses.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    /// The address as supplied, which may sit anywhere inside the block.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl CidrBlock {
    /// Create a block from an address and prefix length.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<CidrBlock, CidrError> {
        if prefix > MAX_PREFIX_LENGTH {
            return Err(CidrError::Range(format!(
                "prefix length {prefix} must be between 0 and {MAX_PREFIX_LENGTH}"
            )));
        }
        Ok(CidrBlock { addr, prefix })
    }

    /// Parse a block from CIDR notation (e.g. "10.0.0.0/24").
    ///
    /// The address part is validated by [`parse_address`]; the prefix must be
    /// a bare decimal number in 0-32.
    pub fn parse(cidr: &str) -> Result<CidrBlock, CidrError> {
        let cidr = cidr.trim();
        if cidr.is_empty() {
            return Err(CidrError::Format("CIDR cannot be empty".to_string()));
        }

        let parts: Vec<&str> = cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(CidrError::Format(format!(
                "invalid CIDR format: {cidr}, expected a.b.c.d/p"
            )));
        }

        let addr = parse_address(parts[0])?;

        let prefix_part = parts[1].trim();
        if !PREFIX_DIGITS.is_match(prefix_part) {
            return Err(CidrError::Format(format!(
                "invalid prefix length: {prefix_part}"
            )));
        }
        let prefix: u8 = prefix_part.parse().map_err(|_| {
            CidrError::Range(format!(
                "prefix length {prefix_part} must be between 0 and {MAX_PREFIX_LENGTH}"
            ))
        })?;

        CidrBlock::new(addr, prefix)
    }

    /// Subnet mask as a host-order integer.
    ///
    /// # Examples
    /// ```
    /// use cidr_subnet_tools::CidrBlock;
    /// let block = CidrBlock::parse("10.0.0.0/24").unwrap();
    /// assert_eq!(block.mask(), 0xFFFFFF00);
    /// ```
    pub fn mask(&self) -> u32 {
        // Widen before shifting so a /0 mask never shifts a u32 by 32.
        let host_len = u32::from(MAX_PREFIX_LENGTH - self.prefix);
        let all_bits = u32::MAX as u64;
        ((all_bits >> host_len) << host_len) as u32
    }

    /// Subnet mask in dotted-quad form ("255.255.255.0" for a /24).
    pub fn mask_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask())
    }

    /// Lowest address of the block (host bits cleared).
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.mask())
    }

    /// Highest address of the block (host bits set).
    ///
    /// For a /32 this is the block's own address; for a /31 it is the upper
    /// address of the point-to-point pair.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network()) | !self.mask())
    }

    /// Rewrite the block onto its subnet boundary, keeping the prefix.
    ///
    /// Idempotent: a block already on its boundary comes back unchanged.
    pub fn normalize(&self) -> CidrBlock {
        CidrBlock {
            addr: self.network(),
            prefix: self.prefix,
        }
    }

    /// True when `ip` falls inside the block.
    ///
    /// Network and broadcast addresses count as inside.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        (u32::from(ip) & self.mask()) == u32::from(self.network())
    }

    /// Parse `ip` as a dotted-quad string and test containment.
    pub fn contains_str(&self, ip: &str) -> Result<bool, CidrError> {
        Ok(self.contains(parse_address(ip)?))
    }

    /// Number of addresses covered by the block, network and broadcast
    /// included.
    pub fn total_address_count(&self) -> u64 {
        1u64 << (MAX_PREFIX_LENGTH - self.prefix)
    }

    /// Number of assignable host addresses.
    pub fn usable_host_count(&self) -> u64 {
        match self.prefix {
            32 => 1,
            31 => 2, // point-to-point link, RFC 3021
            _ => self.total_address_count() - 2,
        }
    }

    /// First assignable host address.
    pub fn first_usable(&self) -> Ipv4Addr {
        match self.prefix {
            32 => self.addr,
            31 => self.network(),
            _ => Ipv4Addr::from(u32::from(self.network()) + 1),
        }
    }

    /// Last assignable host address.
    pub fn last_usable(&self) -> Ipv4Addr {
        match self.prefix {
            32 => self.addr,
            31 => self.broadcast(),
            _ => Ipv4Addr::from(u32::from(self.broadcast()) - 1),
        }
    }

    /// Enumerate assignable host addresses in ascending order.
    ///
    /// `limit` caps how many addresses may be materialized; a block whose
    /// usable host count exceeds it fails with
    /// [`CidrError::CapacityExceeded`] before anything is allocated. Pass
    /// [`DEFAULT_ENUMERATION_LIMIT`] unless the caller has its own ceiling.
    pub fn usable_addresses(&self, limit: u64) -> Result<Vec<Ipv4Addr>, CidrError> {
        match self.prefix {
            32 => Ok(vec![self.addr]),
            31 => {
                let network = u32::from(self.network());
                Ok(vec![Ipv4Addr::from(network), Ipv4Addr::from(network + 1)])
            }
            _ => {
                let usable = self.usable_host_count();
                if usable > limit {
                    return Err(CidrError::CapacityExceeded(format!(
                        "block {block} has {usable} usable hosts, limit is {limit}",
                        block = self
                    )));
                }
                let network = u32::from(self.network());
                let addresses = (1..=usable as u32)
                    .map(|offset| Ipv4Addr::from(network + offset))
                    .collect();
                Ok(addresses)
            }
        }
    }

    /// Split the block into subnets of `new_prefix`.
    ///
    /// Produces 2^(new_prefix - prefix) blocks in ascending address order
    /// that exactly partition this block's range.
    pub fn split(&self, new_prefix: u8) -> Result<Vec<CidrBlock>, CidrError> {
        if new_prefix > MAX_PREFIX_LENGTH {
            return Err(CidrError::Range(format!(
                "prefix length {new_prefix} must be between 0 and {MAX_PREFIX_LENGTH}"
            )));
        }
        if self.prefix == MAX_PREFIX_LENGTH {
            return Err(CidrError::InvalidOperation(format!(
                "cannot split single-host block {block}",
                block = self
            )));
        }
        if new_prefix <= self.prefix {
            return Err(CidrError::InvalidOperation(format!(
                "target prefix /{new_prefix} must be longer than /{current}",
                current = self.prefix
            )));
        }

        let subnet_count = 1u64 << (new_prefix - self.prefix);
        let subnet_size = 1u64 << (MAX_PREFIX_LENGTH - new_prefix);
        let network = address_to_u64(self.network());

        let subnets = (0..subnet_count)
            .map(|i| CidrBlock {
                addr: Ipv4Addr::from((network + i * subnet_size) as u32),
                prefix: new_prefix,
            })
            .collect();
        Ok(subnets)
    }
}

impl std::fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl FromStr for CidrBlock {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<CidrBlock, CidrError> {
        CidrBlock::parse(s)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.prefix);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CidrBlock::parse(&s).map_err(de::Error::custom)
    }
}
