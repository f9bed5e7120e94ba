//! Terminal output formatting
//!
//! Coloured printing for line mode and reports, plus share text.

pub mod display;
pub mod formatters;
pub mod share;

pub use display::{print_banner, print_board, print_keyboard, print_results, print_stats};
pub use share::share_text;
