//! Editor launches: `edit`, `diff` and `fmgr`.
//!
//! The editor is started detached under a server name. When an instance
//! with that name is already listening the file is sent to it with
//! `--remote` instead of opening a new window.

use std::io::Write;

use fling_common::Result;
use fling_exec::{ExecutionRequest, ProcessRunner};

use crate::context::CommandHandlers;

/// Files to open and the editor server that should receive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTarget {
    pub primary_file: String,
    pub server_name: String,
    pub additional_files: Vec<String>,
}

impl EditorTarget {
    pub fn new(primary_file: impl Into<String>, server_name: impl Into<String>) -> Self {
        Self {
            primary_file: primary_file.into(),
            server_name: server_name.into(),
            additional_files: Vec::new(),
        }
    }

    /// Builder: append files opened after the primary one.
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_files
            .extend(files.into_iter().map(Into::into));
        self
    }
}

impl<R: ProcessRunner, W: Write> CommandHandlers<'_, R, W> {
    /// `edit`: open `target` in `editor`, or the configured editor.
    pub fn edit(&mut self, target: &EditorTarget, editor: Option<&str>) -> Result<()> {
        let editor = editor.unwrap_or(&self.config.editor);
        self.launch_editor(editor, target)
    }

    /// `diff`: compare two or three files in the diff editor.
    pub fn diff(&mut self, first: &str, second: &str, third: Option<&str>) -> Result<()> {
        let target = EditorTarget::new(first, &self.config.diff_server)
            .with_files(std::iter::once(second).chain(third));
        self.launch_editor(&self.config.diff_editor, &target)
    }

    /// `fmgr`: browse `directory` in the file-manager editor instance.
    pub fn fmgr(&mut self, directory: &str) -> Result<()> {
        let target = EditorTarget::new(directory, &self.config.file_manager_server);
        self.launch_editor(&self.config.editor, &target)
    }

    fn launch_editor(&self, editor: &str, target: &EditorTarget) -> Result<()> {
        let mut request = ExecutionRequest::new(editor)
            .arg("--servername")
            .arg(&target.server_name);
        if self.server_listening(editor, &target.server_name)? {
            tracing::debug!("{} server {} is up, sending remote", editor, target.server_name);
            request = request.arg("--remote");
        }
        let request = request
            .arg(&target.primary_file)
            .args(&target.additional_files);

        self.runner.start_detached(&request)
    }

    /// Whether `editor --serverlist` names `server`.
    fn server_listening(&self, editor: &str, server: &str) -> Result<bool> {
        let request = ExecutionRequest::new(editor)
            .arg("--serverlist")
            .timeout(self.timeout);
        let servers = self.runner.run_blocking(&request)?.require_success()?;
        Ok(servers.iter().any(|name| name.trim() == server))
    }
}
