//! CLI argument structures and parsing.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Arg, ArgAction, Args, CommandFactory, FromArgMatches, Parser, Subcommand};

use super::styles::{AFTER_HELP, get_styles};

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Fling - launch desktop programs from short commands.
#[derive(Debug, Parser)]
#[command(name = "fling")]
#[command(author, version, about = "Launch desktop programs from short commands", long_about = None)]
#[command(
    styles = get_styles(),
    disable_version_flag = true,
    subcommand_required = true,
    arg_required_else_help = true,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Configuration file (default: ~/.fling/config.toml)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Enable trace-level logging for debugging
    #[arg(long = "trace")]
    pub trace: bool,

    /// Set log verbosity level (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The clap command with `-v/--version` in place of clap's `-V`.
    pub fn command_with_version() -> clap::Command {
        <Self as CommandFactory>::command().arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
    }

    /// Parse the process arguments, exiting with usage on error.
    pub fn parse_args() -> Self {
        Self::try_parse_args_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parse `args`, returning clap's error (help and version included).
    pub fn try_parse_args_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut matches = Self::command_with_version().try_get_matches_from(args)?;
        Self::from_arg_matches_mut(&mut matches)
    }

    /// Effective log level: `--trace`, then `--verbose`, then
    /// `FLING_LOG_LEVEL`, then `--log-level`.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.trace {
            LogLevel::Trace
        } else if self.verbose {
            LogLevel::Debug
        } else if let Ok(env_level) = std::env::var("FLING_LOG_LEVEL") {
            LogLevel::from_str_loose(&env_level).unwrap_or(self.log_level)
        } else {
            self.log_level
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a program detached, without waiting for it
    #[command(visible_alias = "x", display_order = 1)]
    Exec(ProgramArgs),

    /// Run a program, wait for it and print its output
    #[command(visible_alias = "s", display_order = 2)]
    Shell(ShellArgs),

    /// Open a terminal emulator
    #[command(visible_alias = "t", display_order = 3)]
    Term,

    /// Open a file in the IDE
    #[command(visible_alias = "i", display_order = 4)]
    Ide(IdeArgs),

    /// Edit files in a named editor server
    #[command(visible_alias = "e", display_order = 5)]
    Edit(EditArgs),

    /// Open a file or URL with the desktop opener
    #[command(visible_alias = "o", display_order = 6)]
    Openf(OpenArgs),

    /// Open the links listed in a file
    #[command(visible_alias = "lo", display_order = 7)]
    Lopenf(LinkOpenArgs),

    /// Play an audio or video file, or a directory of music
    #[command(visible_alias = "p", display_order = 8)]
    Play(PlayArgs),

    /// Append commands to the shell history file
    #[command(visible_alias = "h", display_order = 9)]
    Hist(HistArgs),

    /// Extract an archive into its own directory
    #[command(visible_alias = "de", display_order = 10)]
    Decomp(DecompArgs),

    /// Compare two or three files in the diff editor
    #[command(visible_alias = "d", display_order = 11)]
    Diff(DiffArgs),

    /// Browse a directory in the file-manager editor
    #[command(visible_alias = "f", display_order = 12)]
    Fmgr(FmgrArgs),

    /// Generate shell completion scripts
    #[command(display_order = 20)]
    Completion(CompletionCommand),

    /// Show the effective configuration
    #[command(display_order = 21)]
    Config(ConfigCommand),
}

impl Commands {
    /// `--timeout` of the commands that wait for their program.
    pub fn timeout(&self) -> Option<&TimeoutArg> {
        match self {
            Commands::Shell(args) => Some(&args.timeout),
            Commands::Ide(args) => Some(&args.timeout),
            Commands::Openf(args) => Some(&args.timeout),
            Commands::Lopenf(args) => Some(&args.timeout),
            Commands::Decomp(args) => Some(&args.timeout),
            _ => None,
        }
    }
}

/// Deadline shared by the commands that wait for their program.
#[derive(Debug, Clone, Default, Args)]
pub struct TimeoutArg {
    /// Kill the program if it runs longer than this
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl TimeoutArg {
    pub fn duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Program and its arguments, passed through untouched.
#[derive(Debug, Args)]
pub struct ProgramArgs {
    /// Program to run
    pub program: String,

    /// Arguments for the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ShellArgs {
    #[clap(flatten)]
    pub timeout: TimeoutArg,

    #[clap(flatten)]
    pub command: ProgramArgs,
}

#[derive(Debug, Args)]
pub struct IdeArgs {
    /// File to open
    pub file: String,

    #[clap(flatten)]
    pub timeout: TimeoutArg,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// File to edit
    pub file: String,

    /// Additional files opened in the same editor
    pub files: Vec<String>,

    /// Editor program (default from configuration)
    #[arg(long = "editor", short = 'e', value_name = "PROGRAM")]
    pub editor: Option<String>,

    /// Editor server name (default from configuration)
    #[arg(long = "server", short = 's', value_name = "NAME")]
    pub server: Option<String>,
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// File or URL to open
    pub target: String,

    #[clap(flatten)]
    pub timeout: TimeoutArg,
}

#[derive(Debug, Args)]
pub struct LinkOpenArgs {
    /// File with one link per line
    pub link_file: PathBuf,

    /// Number of lines to open
    #[arg(default_value_t = 1)]
    pub limit: usize,

    #[clap(flatten)]
    pub timeout: TimeoutArg,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Audio file, video file or directory
    pub file: String,
}

#[derive(Debug, Args)]
pub struct HistArgs {
    /// Commands to record, one history entry each
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub commands: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DecompArgs {
    /// Archive to extract
    pub file: String,

    /// Target directory (default: <FILE>.dir)
    pub target: Option<PathBuf>,

    #[clap(flatten)]
    pub timeout: TimeoutArg,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    pub first: String,
    pub second: String,
    pub third: Option<String>,
}

#[derive(Debug, Args)]
pub struct FmgrArgs {
    /// Directory to browse
    pub directory: String,
}

/// Completion command.
#[derive(Debug, Args)]
pub struct CompletionCommand {
    /// Shell to generate completions for (default: from $SHELL)
    #[arg(value_enum)]
    pub shell: Option<clap_complete::Shell>,
}

/// Config command.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    /// Print only the configuration file location
    #[arg(long)]
    pub path: bool,
}
