//! Disk usage collection via the external `df` command.
//!
//! The collector runs `df -l -m` (local filesystems, megabyte units),
//! waits for it to exit, and hands the captured output to the parser.
//! Subprocess execution goes through the [`CommandRunner`] trait so tests
//! substitute a [`mock::MockCommand`] for the real binary.

pub mod mock;
pub mod parser;
mod traits;

pub use traits::{CommandRunner, RealCommand};

use crate::error::ProbeError;
use std::io;
use tracing::{debug, warn};

/// Flags passed to `df`: local filesystems only, megabyte-scaled blocks.
pub const DF_ARGS: [&str; 2] = ["-l", "-m"];

/// Exit code shells report when a command is not found.
const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// Runs the disk usage command and captures its output.
pub struct DiskCollector<R: CommandRunner> {
    runner: R,
    df_path: String,
}

impl<R: CommandRunner> DiskCollector<R> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `runner` - Command runner implementation (real or mock)
    /// * `df_path` - Program to invoke (usually "df")
    pub fn new(runner: R, df_path: impl Into<String>) -> Self {
        Self {
            runner,
            df_path: df_path.into(),
        }
    }

    /// Runs `df -l -m` and returns its trimmed stdout.
    ///
    /// Every failure mode maps to [`ProbeError::MetricsUnavailable`]:
    /// a missing binary, a non-zero exit, or a launch error. The stderr
    /// text is used as the message when the command produced any.
    pub fn collect(&self) -> Result<String, ProbeError> {
        debug!(program = %self.df_path, args = ?DF_ARGS, "running disk usage command");

        let output = self
            .runner
            .run(&self.df_path, &DF_ARGS)
            .map_err(|e| self.launch_error(e))?;

        match output.status.code() {
            Some(0) => {}
            Some(EXIT_COMMAND_NOT_FOUND) => {
                return Err(ProbeError::MetricsUnavailable(format!(
                    "Command '{}' not found.",
                    self.df_path
                )));
            }
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stderr = stderr.trim();
                warn!(?code, stderr, "disk usage command failed");
                return Err(if stderr.is_empty() {
                    ProbeError::metrics_unavailable()
                } else {
                    ProbeError::MetricsUnavailable(stderr.to_string())
                });
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim().to_string())
    }

    fn launch_error(&self, err: io::Error) -> ProbeError {
        if err.kind() == io::ErrorKind::NotFound {
            ProbeError::MetricsUnavailable(format!("Command '{}' not found.", self.df_path))
        } else {
            ProbeError::MetricsUnavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCommand;
    use super::*;

    #[test]
    fn test_collect_trims_output() {
        let collector = DiskCollector::new(MockCommand::with_output("line one\nline two\n\n"), "df");
        assert_eq!(collector.collect().unwrap(), "line one\nline two");
    }

    #[test]
    fn test_collect_invokes_df_with_portable_flags() {
        let collector = DiskCollector::new(MockCommand::two_volume_df(), "df");
        collector.collect().unwrap();

        let calls = collector.runner.calls();
        assert_eq!(calls, vec![("df".to_string(), vec!["-l".to_string(), "-m".to_string()])]);
    }

    #[test]
    fn test_collect_command_not_found_exit_code() {
        let collector = DiskCollector::new(MockCommand::with_exit_code(127, ""), "df");
        let err = collector.collect().unwrap_err();
        assert_eq!(
            err,
            ProbeError::MetricsUnavailable("Command 'df' not found.".to_string())
        );
        assert_eq!(err.exit_code(), 31);
    }

    #[test]
    fn test_collect_generic_failure() {
        let collector = DiskCollector::new(MockCommand::with_exit_code(1, ""), "df");
        let err = collector.collect().unwrap_err();
        assert_eq!(err, ProbeError::metrics_unavailable());
        assert_eq!(err.exit_code(), 31);
    }

    #[test]
    fn test_collect_failure_surfaces_stderr() {
        let collector =
            DiskCollector::new(MockCommand::with_exit_code(2, "df: illegal option\n"), "df");
        let err = collector.collect().unwrap_err();
        assert_eq!(
            err,
            ProbeError::MetricsUnavailable("df: illegal option".to_string())
        );
    }

    #[test]
    fn test_collect_launch_not_found() {
        let runner =
            MockCommand::with_launch_error(std::io::ErrorKind::NotFound, "no such file");
        let collector = DiskCollector::new(runner, "df");
        let err = collector.collect().unwrap_err();
        assert_eq!(
            err,
            ProbeError::MetricsUnavailable("Command 'df' not found.".to_string())
        );
    }

    #[test]
    fn test_two_volume_round_trip_emits_twelve_lines() {
        use crate::collector::parser::parse_df_output;
        use crate::metrics::MetricSelection;
        use crate::output::emit;

        let collector = DiskCollector::new(MockCommand::two_volume_df(), "df");
        let raw = collector.collect().unwrap();
        let records = parse_df_output(&raw).unwrap();

        let mut buf = Vec::new();
        emit(&records, &MetricSelection::all(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let expected = "\
40:Used Space:4|14336|/|
24:Free Space:4|381183|/|
11:% Used Space:6|3.62|/|
1641:Used Inodes:4|488234|/|
1642:Free Inodes:4|4881964626|/|
1643:% Used Inodes:6|0.01|/|
40:Used Space:4|21504|/private/var/vm|
24:Free Space:4|381183|/private/var/vm|
11:% Used Space:6|5.34|/private/var/vm|
1641:Used Inodes:4|21|/private/var/vm|
1642:Free Inodes:4|4881964626|/private/var/vm|
1643:% Used Inodes:6|0.00|/private/var/vm|
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_collect_launch_other_error() {
        let runner = MockCommand::with_launch_error(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        );
        let collector = DiskCollector::new(runner, "df");
        let err = collector.collect().unwrap_err();
        assert_eq!(err.exit_code(), 31);
        match err {
            ProbeError::MetricsUnavailable(msg) => assert!(msg.contains("permission denied")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
