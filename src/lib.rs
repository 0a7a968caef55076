//! CodeNest tutorial notebook library
//!
//! This library provides an in-memory collection of short code-centric
//! tutorials, search and tag filtering over it, rendering of fenced code in
//! tutorial content, and clipboard copy of code blocks.

mod cli;
mod clipboard;
mod config;
mod copied_indicator;
mod errors;
mod filter;
mod helper;
mod markdown;
mod samples;
mod storage;
mod tutorial;
mod types;
mod view;

// Re-export key components
pub use cli::*;
pub use clipboard::*;
pub use config::*;
pub use copied_indicator::*;
pub use errors::*;
pub use filter::*;
pub use helper::*;
pub use markdown::*;
pub use samples::*;
pub use storage::*;
pub use tutorial::*;
pub use types::*;
pub use view::*;
