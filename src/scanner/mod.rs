//! Source tree scanning

mod filter;
mod walker;

pub use filter::CandidateFilter;
pub use walker::scan_bundles;
