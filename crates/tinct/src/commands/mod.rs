//! Subcommand implementations.

pub mod extract;
pub mod fmt;
pub mod generate;
