//! CLI styling and formatting.
//!
//! Defines ANSI colors and formatting for the CLI help output.

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Fling CLI styled help theme.
pub fn get_styles() -> Styles {
    Styles::styled()
        // Headers (USAGE, COMMANDS, OPTIONS) - Bold cyan
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

/// After-help section with examples, environment variables and paths.
pub const AFTER_HELP: &str = color_print::cstr!(
    r#"<cyan,bold>EXAMPLES</>
    <green,bold>fling x</> <dim>firefox --private-window</>   Start a program and return
    <green,bold>fling e</> <dim>notes.txt</>                  Edit in the running EDITOR server
    <green,bold>fling d</> <dim>old.c new.c</>                Diff two files
    <green,bold>fling p</> <dim>~/music/album</>              Play a directory of music
    <green,bold>fling de</> <dim>release.tar.gz</>            Extract into release.tar.gz.dir/

<cyan,bold>ENVIRONMENT VARIABLES</>
    <yellow>FLING_HOME</>        Override home directory (default: ~/.fling)
    <yellow>FLING_CONFIG</>      Configuration file to load
    <yellow>FLING_LOG_LEVEL</>   Log verbosity (error, warn, info, debug, trace)

<cyan,bold>PATHS</>
    <dim>Config</>     ~/.fling/config.toml
    <dim>History</>    ~/.bash_history"#
);
