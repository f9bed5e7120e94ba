//! CROWdle
//!
//! A daily Dutch word-guessing game in the terminal. One word a day comes from
//! a thesaurus feed; players get six attempts plus one bonus attempt, and
//! rounds and lifetime stats are kept on disk.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crowdle::core::{Word, score_all, verdicts_to_emoji};
//!
//! let target = Word::new("appel").unwrap();
//! let guess = Word::new("peper").unwrap();
//!
//! // 🟨⬜🟩🟩⬜
//! println!("{}", verdicts_to_emoji(&score_all(&target, &guess)));
//! ```

// Core domain types
pub mod core;

// Allowed-guess word lists
pub mod dictionary;

// Round progression
pub mod game;

// Rounds and stats on disk
pub mod storage;

// Word-of-the-day feed
pub mod feed;

// Game + storage + stats for one date
pub mod session;

pub mod config;
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
