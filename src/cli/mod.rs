/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{Cli, Commands, ReportFormat, RoleArg};
pub use commands::handle_command;
