//! SOHO Guard: split an IPv4 network into internal and guest subnets and
//! check simulated traffic against the guest isolation rule.
//!
//! - [`models`] - Network blocks, subnet pairs and traffic records
//! - [`processing`] - Subnet planner, access controller and session state
//! - [`output`] - Traffic log sinks, reports and terminal formatting
//! - [`cli`] - Text command adapter used by the binary

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{GuardError, Result};
pub use models::{Decision, NetworkSpec, SubnetPair, TrafficEvent};
pub use output::{FileLogSink, LogSink};
pub use processing::{evaluate, split, Session};

/// Open the traffic log configured in `config`, creating it if needed.
pub fn open_log_sink(config: &Config) -> Result<FileLogSink> {
    Ok(FileLogSink::open(&config.log_file)?)
}
