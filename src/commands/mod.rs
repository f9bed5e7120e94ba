//! Command implementations

pub mod share;
pub mod simple;
pub mod startup;
pub mod stats;

pub use share::{run_share, share_for_date};
pub use simple::run_simple;
pub use startup::{DictionaryLoader, Startup, build_runtime};
pub use stats::run_stats;
