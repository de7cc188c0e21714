//! CLI command handlers.

pub mod manage;
pub mod run;
