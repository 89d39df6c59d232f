//! Core backtrace logic
//!
//! This module contains the frame and trace types, the framework matchers
//! and the cleaner that ties them together.

pub mod data;
pub mod matcher;
pub mod operations;
pub mod path;
pub mod traits;
