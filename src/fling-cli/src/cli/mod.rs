//! CLI argument parsing and command dispatch.
//!
//! - `args` - command-line argument structures
//! - `styles` - ANSI styling for help output
//! - `handlers` - routing of parsed commands to the handlers

pub mod args;
pub mod handlers;
pub mod styles;

pub use args::{Cli, Commands, LogLevel};
pub use handlers::dispatch_command;
pub use styles::{AFTER_HELP, get_styles};
