//! diskmon - Logical disk monitoring probe.
//!
//! Runs the local `df` command once, derives space and inode usage metrics
//! per mounted volume, and prints the enabled ones in a line-oriented
//! delimited protocol. Intended to be invoked by an external scheduler;
//! holds no state between runs.

pub mod collector;
pub mod error;
pub mod metrics;
pub mod output;
