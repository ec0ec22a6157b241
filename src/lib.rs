//! code-wrapped library
//!
//! Reads the local history kept by VS Code-based editors (Cursor, VS Code and
//! their forks), ranks it, and uploads a yearly recap.

pub mod config;
pub mod history;
pub mod prompt;
pub mod upload;
