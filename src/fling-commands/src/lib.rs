//! Fling command handlers.
//!
//! One method per subcommand on [`CommandHandlers`]. Each decides which
//! external program to launch and how:
//!
//! | command  | launch                                   |
//! |----------|------------------------------------------|
//! | `exec`   | detached, given program                  |
//! | `shell`  | blocking, output printed                 |
//! | `term`   | detached terminal emulator               |
//! | `ide`    | blocking IDE with open-file flag         |
//! | `edit`   | detached editor, remote if server is up  |
//! | `openf`  | blocking generic opener                  |
//! | `lopenf` | `openf` for each line of a link file     |
//! | `play`   | detached audio or video player           |
//! | `hist`   | append to the history file               |
//! | `decomp` | blocking archiver inside a new directory |
//! | `diff`   | `edit` with the diff editor              |
//! | `fmgr`   | `edit` on a directory                    |

mod archive;
mod context;
mod editor;
mod history;
mod launch;
mod media;
mod shell;

#[cfg(test)]
mod tests;

pub use context::CommandHandlers;
pub use editor::EditorTarget;
