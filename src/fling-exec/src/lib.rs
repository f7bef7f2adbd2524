//! Fling Exec - subprocess launching.
//!
//! Two launch modes are offered:
//! - detached: spawn and forget, nothing captured
//! - blocking: stdout and stderr merged into one stream, captured line by
//!   line, returned once the child has exited
//!
//! # Example
//!
//! ```rust,ignore
//! use fling_exec::{ExecutionRequest, ProcessRunner, SystemRunner};
//!
//! let request = ExecutionRequest::new("ls").arg("-la");
//! let lines = SystemRunner.run_blocking(&request)?.require_success()?;
//! ```

mod request;
mod result;
mod runner;


pub use request::ExecutionRequest;
pub use result::ExecutionResult;
pub use runner::{ProcessRunner, SystemRunner};
