//! CIDR block merging.
//!
//! Coalesces a set of blocks into the smallest equivalent set of larger
//! blocks: runs of adjacent same-prefix blocks collapse, a power of two at a
//! time, into the covering block whenever the result starts on its own size
//! boundary.

use crate::models::{address_to_u64, CidrBlock};
use itertools::Itertools;
use std::cmp::Reverse;

/// Merge `blocks` into the minimal covering set.
///
/// The result covers exactly the same address space as the input and is
/// sorted ascending by network address. Blocks that cannot be merged pass
/// through unchanged; the call never fails.
///
/// # Examples
/// ```
/// use cidr_subnet_tools::{merge, CidrBlock};
/// let blocks = [
///     CidrBlock::parse("10.0.0.0/27").unwrap(),
///     CidrBlock::parse("10.0.0.32/27").unwrap(),
/// ];
/// let merged = merge(&blocks);
/// assert_eq!(merged[0].to_string(), "10.0.0.0/26");
/// ```
pub fn merge(blocks: &[CidrBlock]) -> Vec<CidrBlock> {
    if blocks.is_empty() {
        return Vec::new();
    }
    if blocks.len() == 1 {
        return blocks.to_vec();
    }

    let mut current: Vec<CidrBlock> = blocks.iter().map(CidrBlock::normalize).collect();
    let mut pass = 0u32;
    loop {
        pass += 1;
        // Ascending by network, larger prefix first when co-located. The
        // adjacency scan below depends on this order.
        current.sort_by_key(|b| (u32::from(b.network()), Reverse(b.prefix)));

        let merged = merge_pass(&current);
        log::debug!(
            "merge pass {pass}: {before} -> {after} blocks [{list}]",
            before = current.len(),
            after = merged.len(),
            list = merged.iter().join(", "),
        );

        // Newly formed blocks may be adjacent to each other, keep going
        // until a pass stops shrinking the set.
        if merged.len() >= current.len() || merged.len() <= 1 {
            return merged;
        }
        current = merged;
    }
}

/// One group-and-coalesce sweep over normalized, sorted blocks.
fn merge_pass(blocks: &[CidrBlock]) -> Vec<CidrBlock> {
    let mut result = Vec::with_capacity(blocks.len());
    let mut group: Vec<CidrBlock> = Vec::new();

    for &block in blocks {
        if let Some(&last) = group.last() {
            if !extends_run(last, block) {
                coalesce_group(&group, &mut result);
                group.clear();
            }
        }
        group.push(block);
    }
    coalesce_group(&group, &mut result);

    result
}

/// Same prefix and exactly one block size after the run's last member.
fn extends_run(last: CidrBlock, next: CidrBlock) -> bool {
    last.prefix == next.prefix && are_adjacent(last, next)
}

/// Two same-prefix blocks whose network addresses differ by one block size.
fn are_adjacent(first: CidrBlock, second: CidrBlock) -> bool {
    let size = first.total_address_count();
    let first_network = address_to_u64(first.network());
    let second_network = address_to_u64(second.network());
    second_network.checked_sub(first_network) == Some(size)
}

/// Emit a group with every maximal power-of-two run collapsed.
fn coalesce_group(group: &[CidrBlock], result: &mut Vec<CidrBlock>) {
    let mut i = 0;
    while i < group.len() {
        let run = largest_mergeable_run(&group[i..]);
        if run > 1 {
            result.push(merge_run(&group[i..i + run]));
            i += run;
        } else {
            result.push(group[i]);
            i += 1;
        }
    }
}

/// Largest doubling run length (2, 4, 8, ...) at the start of `rest` that
/// can merge into one block.
fn largest_mergeable_run(rest: &[CidrBlock]) -> usize {
    let mut best = 1;
    let mut size = 2;
    while size <= rest.len() {
        if can_merge_run(&rest[..size]) {
            best = size;
        } else {
            break;
        }
        size *= 2;
    }
    best
}

/// A run can merge when all blocks share one prefix, are pairwise adjacent,
/// and the combined block would start on its own size boundary.
fn can_merge_run(run: &[CidrBlock]) -> bool {
    if run.len() < 2 || !run.len().is_power_of_two() {
        return false;
    }

    let prefix = run[0].prefix;
    if run.iter().any(|b| b.prefix != prefix) {
        return false;
    }

    if run.windows(2).any(|pair| !are_adjacent(pair[0], pair[1])) {
        return false;
    }

    let shrink = run.len().trailing_zeros() as u8;
    if shrink > prefix {
        return false;
    }
    let merged_prefix = prefix - shrink;
    let merged_size = 1u64 << (32 - u32::from(merged_prefix));

    // Contiguous but misaligned runs (e.g. four /26s starting at a .64
    // offset) must not collapse.
    address_to_u64(run[0].network()) % merged_size == 0
}

/// Collapse a validated run into its covering block.
fn merge_run(run: &[CidrBlock]) -> CidrBlock {
    let first = run[0];
    let merged_prefix = first.prefix - run.len().trailing_zeros() as u8;
    CidrBlock {
        addr: first.network(),
        prefix: merged_prefix,
    }
}
