//! Markup discovery for collapsible blocks.
//!
//! Turns server-rendered HTML into [`BlockSpec`](collapsible_types::BlockSpec)s
//! and navigation links. Containers without a usable id are skipped, never
//! reported as errors; the only failure is a selector that does not parse.

mod rules;
mod scan;

use thiserror::Error;

pub use rules::ScanRules;
pub use scan::{NavigationLink, PageScan, scan, scan_fragment};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}
