//! scriptman core: template extraction/substitution, shell execution, and
//! the script store the CLI drives.

pub mod config;
pub mod exec;
pub mod script;
pub mod template;
