//! Human-readable block reports.
//!
//! Pure presentation over the public [`CidrBlock`] accessors; nothing here
//! computes subnet arithmetic of its own.

use crate::models::CidrBlock;

/// Render one labelled report line.
fn report_line<T: ToString>(label: &str, value: T) -> String {
    format!("{label:<22}{}\n", value.to_string())
}

/// Render a multi-line summary of a block's derived values.
///
/// # Examples
/// ```
/// use cidr_subnet_tools::{detailed_report, CidrBlock};
/// let block = CidrBlock::parse("192.168.1.100/24").unwrap();
/// let report = detailed_report(&block);
/// assert!(report.contains("192.168.1.255"));
/// ```
pub fn detailed_report(block: &CidrBlock) -> String {
    let mut report = String::new();
    report.push_str(&report_line("CIDR:", block));
    report.push_str(&report_line("Network address:", block.network()));
    report.push_str(&report_line("Broadcast address:", block.broadcast()));
    report.push_str(&report_line("Subnet mask:", block.mask_address()));
    report.push_str(&report_line("First usable IP:", block.first_usable()));
    report.push_str(&report_line("Last usable IP:", block.last_usable()));
    report.push_str(&report_line("Total IP count:", block.total_address_count()));
    report.push_str(&report_line("Usable IP count:", block.usable_host_count()));
    report
}
