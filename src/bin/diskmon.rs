//! diskmon - Logical disk metrics probe.
//!
//! Runs `df -l -m` once and prints space and inode metrics per mounted
//! volume, one delimited line per enabled metric:
//!
//!   40:Used Space:4|14336|/|
//!
//! Usage:
//!   diskmon                  # all six metrics
//!   diskmon "1,0,1,0,0,1"    # positional 0/1 flags:
//!                            # used, free, %used, iused, ifree, i%used
//!
//! Exit codes: 0 success, 31 metrics unavailable, 1 any other error.

use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

use diskmon::collector::parser::parse_df_output;
use diskmon::collector::{DiskCollector, RealCommand};
use diskmon::error::ProbeError;
use diskmon::metrics::MetricSelection;
use diskmon::output::emit;

/// Logical disk metrics probe.
#[derive(Parser)]
#[command(name = "diskmon", about = "Logical disk metrics probe", version)]
struct Args {
    /// Metric state: six comma-separated 0/1 flags for used, free, %used,
    /// iused, ifree, i%used. Omit to enable all metrics.
    #[arg(value_name = "METRIC_STATE")]
    metric_state: Option<String>,

    /// Program invoked to list disk usage (for testing/mocking).
    #[arg(long, default_value = "df")]
    df_path: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(err) = run(&args) {
        // Exactly one diagnostic line, on stdout, with no metric lines
        // before it. The exit code is part of the protocol.
        println!("{}", err);
        std::process::exit(err.exit_code());
    }
}

fn run(args: &Args) -> Result<(), ProbeError> {
    let selection = match &args.metric_state {
        Some(state) => MetricSelection::parse(state)?,
        None => MetricSelection::all(),
    };

    let collector = DiskCollector::new(RealCommand::new(), &args.df_path);
    let raw = collector.collect()?;
    debug!(bytes = raw.len(), "captured disk usage output");

    let records = parse_df_output(&raw)?;
    debug!(records = records.len(), "parsed metric records");

    let stdout = std::io::stdout();
    emit(&records, &selection, stdout.lock())
        .map_err(|e| ProbeError::Invalid(e.to_string()))?;

    Ok(())
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Logs go to stderr so the stdout metric
/// protocol stays clean.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("diskmon={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
