//! Shared helpers: command execution, parsing and file output

pub mod command;
pub mod file;
pub mod parsing;
