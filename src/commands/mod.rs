//! Subcommand implementations.
pub mod edit;
pub mod extract;
pub mod serve;
