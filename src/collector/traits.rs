//! Abstraction over subprocess execution to enable testing and mocking.
//!
//! The `CommandRunner` trait allows the collector to invoke the real `df`
//! binary in production and a canned mock implementation in tests.

use std::io;
use std::process::{Command, Output, Stdio};

/// Abstraction for running an external command to completion.
pub trait CommandRunner {
    /// Runs a program with the given arguments, capturing stdout and stderr.
    ///
    /// Blocks until the child exits. An `Err` means the process could not
    /// be launched at all; a non-zero exit status is reported through the
    /// returned [`Output`].
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Output>;
}

/// Real subprocess runner that delegates to [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RealCommand;

impl RealCommand {
    /// Creates a new `RealCommand` instance.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for RealCommand {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Output> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
    }
}
