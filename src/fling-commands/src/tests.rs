//! Handler tests driven by a recording [`ProcessRunner`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use fling_common::{FlingConfig, FlingError, Result};
use fling_exec::{ExecutionRequest, ExecutionResult, ProcessRunner};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Launch {
    Detached(ExecutionRequest),
    Blocking(ExecutionRequest),
}

/// Records every launch; blocking runs pop scripted results, defaulting to
/// a silent success.
#[derive(Default)]
struct RecordingRunner {
    launches: RefCell<Vec<Launch>>,
    results: RefCell<VecDeque<ExecutionResult>>,
}

impl RecordingRunner {
    fn with_results(results: impl IntoIterator<Item = ExecutionResult>) -> Self {
        Self {
            launches: RefCell::default(),
            results: RefCell::new(results.into_iter().collect()),
        }
    }

    fn launches(&self) -> Vec<Launch> {
        self.launches.borrow().clone()
    }

    fn detached(&self) -> Vec<ExecutionRequest> {
        self.launches()
            .into_iter()
            .filter_map(|l| match l {
                Launch::Detached(r) => Some(r),
                Launch::Blocking(_) => None,
            })
            .collect()
    }

    fn blocking(&self) -> Vec<ExecutionRequest> {
        self.launches()
            .into_iter()
            .filter_map(|l| match l {
                Launch::Blocking(r) => Some(r),
                Launch::Detached(_) => None,
            })
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn start_detached(&self, request: &ExecutionRequest) -> Result<()> {
        self.launches
            .borrow_mut()
            .push(Launch::Detached(request.clone()));
        Ok(())
    }

    fn run_blocking(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        self.launches
            .borrow_mut()
            .push(Launch::Blocking(request.clone()));
        Ok(self
            .results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ExecutionResult::new(0, Vec::new())))
    }
}

fn ok(lines: &[&str]) -> ExecutionResult {
    ExecutionResult::new(0, lines.iter().map(|s| s.to_string()).collect())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn printed(handlers: CommandHandlers<'_, RecordingRunner, Vec<u8>>) -> String {
    String::from_utf8(handlers.into_output()).unwrap()
}

mod launch_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exec_is_detached() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();
        let mut handlers = CommandHandlers::new(&config, &runner, Vec::new());

        handlers.exec("firefox", &strings(&["--new-window", "x.org"])).unwrap();

        assert_eq!(
            runner.launches(),
            vec![Launch::Detached(
                ExecutionRequest::new("firefox").args(["--new-window", "x.org"])
            )]
        );
        assert!(printed(handlers).is_empty());
    }

    #[test]
    fn test_term_uses_configured_terminal() {
        let config = FlingConfig {
            terminal: "urxvt".to_string(),
            ..FlingConfig::default()
        };
        let runner = RecordingRunner::default();
        CommandHandlers::new(&config, &runner, Vec::new()).term().unwrap();

        assert_eq!(runner.detached(), vec![ExecutionRequest::new("urxvt")]);
    }
}

mod shell_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shell_prints_each_line() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ok(&["total 0", "a", "b"])]);
        let mut handlers = CommandHandlers::new(&config, &runner, Vec::new());

        handlers.shell("ls", &strings(&["-la", "/tmp"])).unwrap();

        assert_eq!(
            runner.blocking(),
            vec![ExecutionRequest::new("ls").args(["-la", "/tmp"])]
        );
        assert_eq!(printed(handlers), "total 0\na\nb\n");
    }

    #[test]
    fn test_shell_non_zero_exit_propagates() {
        let config = FlingConfig::default();
        let runner =
            RecordingRunner::with_results([ExecutionResult::new(2, strings(&["no such file"]))]);
        let mut handlers = CommandHandlers::new(&config, &runner, Vec::new());

        let err = handlers.shell("ls", &strings(&["/missing"])).unwrap_err();

        assert!(matches!(err, FlingError::NonZeroExit { code: 2, .. }));
        assert!(printed(handlers).is_empty());
    }

    #[test]
    fn test_blocking_requests_carry_timeout() {
        let config = FlingConfig {
            blocking_timeout_secs: Some(7),
            ..FlingConfig::default()
        };
        let runner = RecordingRunner::default();
        CommandHandlers::new(&config, &runner, Vec::new())
            .openf("a.pdf")
            .unwrap();
        CommandHandlers::new(&config, &runner, Vec::new())
            .with_timeout(None)
            .openf("b.pdf")
            .unwrap();

        let blocking = runner.blocking();
        assert_eq!(blocking[0].timeout, Some(std::time::Duration::from_secs(7)));
        assert_eq!(blocking[1].timeout, None);
    }

    #[test]
    fn test_ide_passes_open_flag() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ok(&["opened"])]);
        let mut handlers = CommandHandlers::new(&config, &runner, Vec::new());

        handlers.ide("src/main.rs").unwrap();

        assert_eq!(
            runner.blocking(),
            vec![ExecutionRequest::new("eclipse").args(["-e", "src/main.rs"])]
        );
        assert_eq!(printed(handlers), "opened\n");
    }

    #[test]
    fn test_openf_uses_opener() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();
        CommandHandlers::new(&config, &runner, Vec::new())
            .openf("https://example.org")
            .unwrap();

        assert_eq!(
            runner.blocking(),
            vec![ExecutionRequest::new("exo-open").arg("https://example.org")]
        );
    }
}

mod lopenf_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("links.txt");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn opened(runner: &RecordingRunner) -> Vec<String> {
        runner
            .blocking()
            .into_iter()
            .map(|r| {
                assert_eq!(r.program, "exo-open");
                r.args[0].clone()
            })
            .collect()
    }

    #[test]
    fn test_opens_each_line_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let links = link_file(dir.path(), "first.pdf\nhttps://second.org\n");
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .lopenf(&links, 2)
            .unwrap();

        assert_eq!(opened(&runner), vec!["first.pdf", "https://second.org"]);
    }

    #[test]
    fn test_short_file_stops_early() {
        let dir = tempfile::tempdir().unwrap();
        let links = link_file(dir.path(), "only.pdf\n");
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .lopenf(&links, 2)
            .unwrap();

        assert_eq!(opened(&runner), vec!["only.pdf"]);
    }

    #[test]
    fn test_limit_caps_lines() {
        let dir = tempfile::tempdir().unwrap();
        let links = link_file(dir.path(), "a\nb\nc\n");
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .lopenf(&links, 1)
            .unwrap();

        assert_eq!(opened(&runner), vec!["a"]);
    }

    #[test]
    fn test_missing_link_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        let err = CommandHandlers::new(&config, &runner, Vec::new())
            .lopenf(&dir.path().join("absent"), 1)
            .unwrap_err();

        assert!(matches!(err, FlingError::Io { .. }));
        assert!(runner.launches().is_empty());
    }

    #[test]
    fn test_open_failure_stops_iteration() {
        let dir = tempfile::tempdir().unwrap();
        let links = link_file(dir.path(), "bad\ngood\n");
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ExecutionResult::new(4, Vec::new())]);

        let err = CommandHandlers::new(&config, &runner, Vec::new())
            .lopenf(&links, 2)
            .unwrap_err();

        assert!(matches!(err, FlingError::NonZeroExit { code: 4, .. }));
        assert_eq!(opened(&runner), vec!["bad"]);
    }
}

mod editor_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_edit_starts_new_server() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ok(&["GVIM", "DIFF"])]);
        let target = EditorTarget::new("foo.txt", "EDITOR");

        CommandHandlers::new(&config, &runner, Vec::new())
            .edit(&target, None)
            .unwrap();

        assert_eq!(
            runner.launches(),
            vec![
                Launch::Blocking(ExecutionRequest::new("gvim").arg("--serverlist")),
                Launch::Detached(
                    ExecutionRequest::new("gvim").args(["--servername", "EDITOR", "foo.txt"])
                ),
            ]
        );
    }

    #[test]
    fn test_edit_reuses_listening_server() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ok(&["DIFF", "EDITOR"])]);
        let target = EditorTarget::new("foo.txt", "EDITOR");

        CommandHandlers::new(&config, &runner, Vec::new())
            .edit(&target, None)
            .unwrap();

        assert_eq!(
            runner.detached(),
            vec![ExecutionRequest::new("gvim").args([
                "--servername",
                "EDITOR",
                "--remote",
                "foo.txt"
            ])]
        );
    }

    #[test]
    fn test_edit_custom_editor_server_and_extra_files() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();
        let target = EditorTarget::new("a.rs", "WORK").with_files(["b.rs", "c.rs"]);

        CommandHandlers::new(&config, &runner, Vec::new())
            .edit(&target, Some("mvim"))
            .unwrap();

        assert_eq!(
            runner.launches(),
            vec![
                Launch::Blocking(ExecutionRequest::new("mvim").arg("--serverlist")),
                Launch::Detached(ExecutionRequest::new("mvim").args([
                    "--servername",
                    "WORK",
                    "a.rs",
                    "b.rs",
                    "c.rs"
                ])),
            ]
        );
    }

    #[test]
    fn test_edit_server_query_failure_propagates() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ExecutionResult::new(1, Vec::new())]);

        let err = CommandHandlers::new(&config, &runner, Vec::new())
            .edit(&EditorTarget::new("foo.txt", "EDITOR"), None)
            .unwrap_err();

        assert!(matches!(err, FlingError::NonZeroExit { code: 1, .. }));
        assert!(runner.detached().is_empty());
    }

    #[test]
    fn test_diff_two_files() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .diff("old.c", "new.c", None)
            .unwrap();

        assert_eq!(
            runner.launches(),
            vec![
                Launch::Blocking(ExecutionRequest::new("gvimdiff").arg("--serverlist")),
                Launch::Detached(ExecutionRequest::new("gvimdiff").args([
                    "--servername",
                    "DIFF",
                    "old.c",
                    "new.c"
                ])),
            ]
        );
    }

    #[test]
    fn test_diff_three_files_remote() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ok(&["DIFF"])]);

        CommandHandlers::new(&config, &runner, Vec::new())
            .diff("base", "mine", Some("theirs"))
            .unwrap();

        assert_eq!(
            runner.detached(),
            vec![ExecutionRequest::new("gvimdiff").args([
                "--servername",
                "DIFF",
                "--remote",
                "base",
                "mine",
                "theirs"
            ])]
        );
    }

    #[test]
    fn test_fmgr_uses_file_manager_server() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .fmgr("/home")
            .unwrap();

        assert_eq!(
            runner.detached(),
            vec![ExecutionRequest::new("gvim").args(["--servername", "FILEMANAGER", "/home"])]
        );
    }
}

mod play_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_audio_and_video_players() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();
        let mut handlers = CommandHandlers::new(&config, &runner, Vec::new());

        handlers.play("song.flac").unwrap();
        handlers.play("film.mkv").unwrap();

        assert_eq!(
            runner.detached(),
            vec![
                ExecutionRequest::new("audacious").arg("song.flac"),
                ExecutionRequest::new("mpv").arg("film.mkv"),
            ]
        );
    }

    #[test]
    fn test_directory_goes_to_audio_player() {
        let dir = tempfile::tempdir().unwrap();
        let album = dir.path().to_string_lossy().into_owned();
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .play(&album)
            .unwrap();

        assert_eq!(
            runner.detached(),
            vec![ExecutionRequest::new("audacious").arg(album)]
        );
    }

    #[test]
    fn test_unplayable_files_fail() {
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();
        let mut handlers = CommandHandlers::new(&config, &runner, Vec::new());

        for name in ["notes.txt", "bundle.zip"] {
            match handlers.play(name) {
                Err(FlingError::UnknownFileType { filename }) => assert_eq!(filename, name),
                other => panic!("expected UnknownFileType for {name}, got {other:?}"),
            }
        }
        assert!(runner.launches().is_empty());
    }
}

mod hist_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with_history(path: &Path) -> FlingConfig {
        FlingConfig {
            history_file: path.to_path_buf(),
            ..FlingConfig::default()
        }
    }

    #[test]
    fn test_appends_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        std::fs::write(&path, "echo before\n").unwrap();
        let config = config_with_history(&path);
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .hist(&strings(&["ls -la", "pwd"]))
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "echo before\nls -la\npwd\n"
        );
        assert!(runner.launches().is_empty());
    }

    #[test]
    fn test_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_history");
        let config = config_with_history(&path);
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .hist(&strings(&["make"]))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "make\n");
    }

    #[test]
    fn test_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_history(&dir.path().join("no/such/dir/history"));
        let runner = RecordingRunner::default();

        let err = CommandHandlers::new(&config, &runner, Vec::new())
            .hist(&strings(&["make"]))
            .unwrap_err();

        assert!(matches!(err, FlingError::Io { .. }));
    }
}

mod decomp_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("archive.tar.gz");
        let archive = archive.to_str().unwrap();
        let config = FlingConfig::default();
        let runner = RecordingRunner::with_results([ok(&["x/", "x/a.txt"])]);
        let mut handlers = CommandHandlers::new(&config, &runner, Vec::new());

        handlers.decomp(archive, None).unwrap();

        let target = dir.path().join("archive.tar.gz.dir");
        assert!(target.is_dir());
        assert_eq!(
            runner.blocking(),
            vec![ExecutionRequest::new("tar")
                .args(["xvzf", "../archive.tar.gz"])
                .current_dir(&target)]
        );
        assert_eq!(printed(handlers), "x/\nx/a.txt\n");
    }

    #[test]
    fn test_explicit_target_uses_absolute_archive_path() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("photos.zip");
        let target = dir.path().join("out/photos");
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .decomp(archive.to_str().unwrap(), Some(&target))
            .unwrap();

        assert!(target.is_dir());
        assert_eq!(
            runner.blocking(),
            vec![ExecutionRequest::new("unzip")
                .arg(archive.to_str().unwrap())
                .current_dir(&target)]
        );
    }

    #[test]
    fn test_existing_target_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("src.rar");
        std::fs::create_dir(dir.path().join("src.rar.dir")).unwrap();
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        CommandHandlers::new(&config, &runner, Vec::new())
            .decomp(archive.to_str().unwrap(), None)
            .unwrap();

        assert_eq!(runner.blocking()[0].args, vec!["x", "../src.rar"]);
    }

    #[test]
    fn test_unknown_archive_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("image.iso");
        let config = FlingConfig::default();
        let runner = RecordingRunner::default();

        let err = CommandHandlers::new(&config, &runner, Vec::new())
            .decomp(archive.to_str().unwrap(), None)
            .unwrap_err();

        assert!(matches!(err, FlingError::UnknownFileType { .. }));
        assert!(!dir.path().join("image.iso.dir").exists());
        assert!(runner.launches().is_empty());
    }

    #[test]
    fn test_extraction_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.tar");
        let config = FlingConfig::default();
        let runner =
            RecordingRunner::with_results([ExecutionResult::new(2, strings(&["not a tar"]))]);

        let err = CommandHandlers::new(&config, &runner, Vec::new())
            .decomp(archive.to_str().unwrap(), None)
            .unwrap_err();

        match err {
            FlingError::NonZeroExit { code, output } => {
                assert_eq!(code, 2);
                assert_eq!(output, vec!["not a tar"]);
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }
}
