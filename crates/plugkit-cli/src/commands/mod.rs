//! Subcommand handlers. Each turns parsed arguments into calls on the core
//! services and renders the result; none of them hold business logic.

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
