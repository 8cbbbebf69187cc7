// cargo watch -x 'fmt' -x 'test'

mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::CidrError;
pub use models::{
    address_from_u64, address_to_u64, parse_address, CidrBlock, DEFAULT_ENUMERATION_LIMIT,
    MAX_ADDRESS_VALUE, MAX_PREFIX_LENGTH,
};
pub use output::detailed_report;
pub use processing::merge;

/// Parse a batch of CIDR strings, failing on the first invalid entry.
pub fn parse_blocks(cidrs: &[&str]) -> Result<Vec<CidrBlock>, CidrError> {
    cidrs.iter().map(|s| CidrBlock::parse(s)).collect()
}

/// Parse a batch of CIDR strings and merge them into the minimal covering
/// set.
pub fn merge_cidr_strings(cidrs: &[&str]) -> Result<Vec<CidrBlock>, CidrError> {
    let blocks = parse_blocks(cidrs)?;
    Ok(merge(&blocks))
}
