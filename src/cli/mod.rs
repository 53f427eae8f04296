//! Command implementations behind the `bookrec` binary.

pub mod commands;
