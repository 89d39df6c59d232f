//! tracesift - clean exception backtraces
//!
//! This library rewrites raw stack frames with configurable substitution
//! rules, cleans the paths inside them, and splits the result into
//! application frames and framework frames.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;
pub mod utils;

// Re-export core types and traits for easier use
pub use crate::core::{
    data::{ClassifiedFrame, Frame, FrameKind, FrameLocation, Trace, TraceSummary},
    matcher::{DEFAULT_FRAMEWORK_PATTERN, RegexMatcher, SubstringMatcher},
    operations::{BacktraceCleaner, SubstitutionRule},
    traits::FrameMatcher,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
