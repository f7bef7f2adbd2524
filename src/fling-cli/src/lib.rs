//! Fling CLI library.
//!
//! Argument parsing and dispatch live in [`cli`]; this module holds the
//! process-level concerns shared by the binary: logging setup and turning
//! errors into diagnostics and exit codes.

pub mod cli;

use fling_common::FlingError;

use crate::cli::LogLevel;

/// Crates whose log level follows the CLI flags.
const LOG_TARGETS: &[&str] = &["fling_cli", "fling_commands", "fling_exec", "fling_common"];

/// Build the tracing filter for `level`.
///
/// When `RUST_LOG` is set its directives are kept and the Fling crates are
/// pinned to `level` on top of them.
pub fn log_filter(level: LogLevel, rust_log: Option<&str>) -> String {
    let level = level.as_filter_str();
    match rust_log {
        Some(base) if !base.trim().is_empty() => {
            let crates: Vec<String> = LOG_TARGETS
                .iter()
                .map(|target| format!("{target}={level}"))
                .collect();
            format!("{base},{}", crates.join(","))
        }
        _ => level.to_string(),
    }
}

/// Initialize stderr logging.
pub fn init_logging(level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(level, rust_log.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The [`FlingError`] at the root of `err`, if any.
fn fling_error(err: &anyhow::Error) -> Option<&FlingError> {
    err.chain().find_map(|cause| cause.downcast_ref::<FlingError>())
}

/// Process exit code for a failed invocation.
///
/// A failed external program passes its own status through; everything
/// else exits with 1.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    fling_error(err)
        .and_then(FlingError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

/// Print a diagnostic for `err` on stderr, followed by the captured output
/// of a failed program.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {err:#}");
    if let Some(FlingError::NonZeroExit { output, .. }) = fling_error(err) {
        for line in output {
            eprintln!("  {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn non_zero(code: i32) -> anyhow::Error {
        anyhow::Error::new(FlingError::NonZeroExit {
            code,
            output: Vec::new(),
        })
    }

    #[test]
    fn test_exit_code_passes_child_status_through() {
        assert_eq!(exit_code_for(&non_zero(3)), 3);
        assert_eq!(exit_code_for(&non_zero(255)), 255);
    }

    #[test]
    fn test_exit_code_out_of_range() {
        assert_eq!(exit_code_for(&non_zero(-1)), 1);
        assert_eq!(exit_code_for(&non_zero(300)), 1);
    }

    #[test]
    fn test_exit_code_through_context() {
        let err: anyhow::Result<()> = Err(FlingError::NonZeroExit {
            code: 4,
            output: Vec::new(),
        })
        .context("Failed to open link");
        assert_eq!(exit_code_for(&err.unwrap_err()), 4);
    }

    #[test]
    fn test_exit_code_other_errors() {
        let err = anyhow::Error::new(FlingError::UnknownFileType {
            filename: "a.txt".to_string(),
        });
        assert_eq!(exit_code_for(&err), 1);
        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), 1);
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(LogLevel::Warn, None), "warn");
        assert_eq!(log_filter(LogLevel::Debug, Some("  ")), "debug");
        assert_eq!(
            log_filter(LogLevel::Info, Some("hyper=off")),
            "hyper=off,fling_cli=info,fling_commands=info,fling_exec=info,fling_common=info"
        );
    }
}
