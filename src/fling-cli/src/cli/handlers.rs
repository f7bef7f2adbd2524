//! Command dispatch and execution handlers.
//!
//! Routes each parsed subcommand to its [`CommandHandlers`] method.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap_complete::{Shell, generate};

use fling_commands::{CommandHandlers, EditorTarget};
use fling_common::{FlingConfig, dirs::resolve_config_path};
use fling_exec::SystemRunner;

use super::args::*;

/// Dispatch a CLI command to its handler.
pub fn dispatch_command(cli: Cli) -> Result<()> {
    let location = resolve_config_path(cli.config.as_deref());

    if let Commands::Completion(completion_cli) = &cli.command {
        generate_completions(
            completion_cli
                .shell
                .unwrap_or_else(detect_shell_from_env),
        );
        return Ok(());
    }

    let config = FlingConfig::load(location.as_ref()).context("Failed to load configuration")?;
    let runner = SystemRunner;
    let mut handlers = CommandHandlers::new(&config, &runner, io::stdout().lock());
    if let Some(timeout) = cli.command.timeout().and_then(TimeoutArg::duration) {
        handlers = handlers.with_timeout(Some(timeout));
    }

    match cli.command {
        Commands::Exec(args) => handlers.exec(&args.program, &args.args)?,
        Commands::Shell(args) => handlers.shell(&args.command.program, &args.command.args)?,
        Commands::Term => handlers.term()?,
        Commands::Ide(args) => handlers.ide(&args.file)?,
        Commands::Edit(args) => {
            let server = args.server.unwrap_or_else(|| config.editor_server.clone());
            let target = EditorTarget::new(args.file, server).with_files(args.files);
            handlers.edit(&target, args.editor.as_deref())?
        }
        Commands::Openf(args) => handlers.openf(&args.target)?,
        Commands::Lopenf(args) => handlers.lopenf(&args.link_file, args.limit)?,
        Commands::Play(args) => handlers.play(&args.file)?,
        Commands::Hist(args) => handlers.hist(&args.commands)?,
        Commands::Decomp(args) => handlers.decomp(&args.file, args.target.as_deref())?,
        Commands::Diff(args) => handlers.diff(&args.first, &args.second, args.third.as_deref())?,
        Commands::Fmgr(args) => handlers.fmgr(&args.directory)?,
        Commands::Config(config_cli) => show_config(&config, location.as_ref(), config_cli)?,
        Commands::Completion(_) => {}
    }
    Ok(())
}

/// Handle the config command.
fn show_config(
    config: &FlingConfig,
    location: Option<&fling_common::dirs::ConfigLocation>,
    config_cli: ConfigCommand,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if config_cli.path {
        let location = location.context("Cannot determine the configuration file location")?;
        writeln!(stdout, "{}", location.path.display())?;
        return Ok(());
    }

    let text = config.to_toml_string()?;
    write!(stdout, "{text}")?;
    Ok(())
}

/// Detect the user's shell from the SHELL environment variable.
fn detect_shell_from_env() -> Shell {
    if let Ok(shell_path) = std::env::var("SHELL") {
        let shell_name = std::path::Path::new(&shell_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();

        match shell_name.as_str() {
            "bash" => Shell::Bash,
            "zsh" => Shell::Zsh,
            "fish" => Shell::Fish,
            "powershell" | "pwsh" => Shell::PowerShell,
            "elvish" => Shell::Elvish,
            _ => {
                tracing::warn!("Unknown shell '{shell_name}' from $SHELL, defaulting to bash");
                Shell::Bash
            }
        }
    } else {
        Shell::Bash
    }
}

/// Generate shell completions to stdout.
fn generate_completions(shell: Shell) {
    /// Writer that silently ignores BrokenPipe errors.
    struct BrokenPipeIgnorer<W: Write> {
        inner: W,
    }

    impl<W: Write> Write for BrokenPipeIgnorer<W> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            match self.inner.write(buf) {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(buf.len()),
                other => other,
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            match self.inner.flush() {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        }
    }

    let mut cmd = Cli::command_with_version();
    let mut out = BrokenPipeIgnorer {
        inner: io::stdout().lock(),
    };
    generate(shell, &mut cmd, "fling", &mut out);
}
