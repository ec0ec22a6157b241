//! CLI commands

pub mod stats;
pub mod utils;
pub mod wrapped;
