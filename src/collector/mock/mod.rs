//! Mock command runner for testing without a real `df` binary.
//!
//! `MockCommand` returns a canned response and records every invocation,
//! so tests can assert both the collector's behavior and the exact
//! command line it issued.

use crate::collector::traits::CommandRunner;
use std::cell::RefCell;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};

/// Canned result for one `run` call.
#[derive(Debug, Clone)]
enum MockResponse {
    /// The child ran and exited with the given code and streams.
    Exited {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The child could not be launched at all.
    LaunchError { kind: io::ErrorKind, message: String },
}

/// In-memory command runner for testing.
pub struct MockCommand {
    response: MockResponse,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl MockCommand {
    /// A run that succeeds with the given stdout.
    pub fn with_output(stdout: impl Into<String>) -> Self {
        Self {
            response: MockResponse::Exited {
                code: 0,
                stdout: stdout.into(),
                stderr: String::new(),
            },
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A run that exits with the given non-zero code and stderr text.
    pub fn with_exit_code(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            response: MockResponse::Exited {
                code,
                stdout: String::new(),
                stderr: stderr.into(),
            },
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A run where the process cannot be launched.
    pub fn with_launch_error(kind: io::ErrorKind, message: impl Into<String>) -> Self {
        Self {
            response: MockResponse::LaunchError {
                kind,
                message: message.into(),
            },
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A realistic two-volume `df -l -m` capture (9-column output with
    /// inode counts, mount point in the last column).
    pub fn two_volume_df() -> Self {
        Self::with_output(
            "\
Filesystem    1M-blocks  Used Available Capacity   iused      ifree %iused  Mounted on
/dev/disk1s1     476802 14336    381183     4%    488234 4881964626    0%   /
/dev/disk1s4     476802 21504    381183     6%        21 4881964626    0%   /private/var/vm
",
        )
    }

    /// Every `(program, args)` pair passed to `run`, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for MockCommand {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Output> {
        self.calls.borrow_mut().push((
            program.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));

        match &self.response {
            MockResponse::Exited {
                code,
                stdout,
                stderr,
            } => Ok(Output {
                // Raw wait status: exit code lives in the high byte.
                status: ExitStatus::from_raw(code << 8),
                stdout: stdout.clone().into_bytes(),
                stderr: stderr.clone().into_bytes(),
            }),
            MockResponse::LaunchError { kind, message } => {
                Err(io::Error::new(*kind, message.clone()))
            }
        }
    }
}
