//! Output formatting for block data.
//!
//! This module handles presenting derived block values:
//! - [`report`] - human-readable block reports

mod report;

pub use report::detailed_report;
