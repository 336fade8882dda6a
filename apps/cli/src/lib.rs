//! Scout CLI: one subcommand per agent demo.

pub use cmd::{Cli, Command};

pub mod cmd;
pub mod config;
pub mod session;
