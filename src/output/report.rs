//! Plain-text network security report.
//!
//! Lists the current subnets and the most recent traffic records.

use super::LogSink;
use crate::config::{Config, REPORT_LINE_WIDTH};
use crate::error::Result;
use crate::models::SubnetDetails;
use crate::processing::{Session, SubnetSummary};
use itertools::Itertools;
use std::path::PathBuf;

pub const REPORT_TITLE: &str = "SOHO Guard - Network Security Report";

fn truncate(line: &str, width: usize) -> String {
    line.chars().take(width).collect()
}

fn details_line(label: &str, d: &SubnetDetails) -> String {
    format!(
        "{label:<8} network {network:<15} broadcast {broadcast:<15} hosts {hosts}",
        network = d.network.to_string(),
        broadcast = d.broadcast.to_string(),
        hosts = d.hosts,
    )
}

/// Render the report text from a subnet summary and log records (oldest first).
pub fn render_report(summary: &SubnetSummary, records: &[String]) -> String {
    let header = [
        REPORT_TITLE.to_string(),
        String::new(),
        format!("Network         : {}", summary.parent),
        format!("Internal Subnet : {}", summary.internal.block),
        format!("Guest Subnet    : {}", summary.guest.block),
        String::new(),
        details_line("Internal", &summary.internal),
        details_line("Guest", &summary.guest),
        String::new(),
        "Traffic Logs:".to_string(),
    ];
    let logs = records
        .iter()
        .map(|r| format!("  {}", truncate(r, REPORT_LINE_WIDTH)));

    let mut report = header.into_iter().chain(logs).join("\n");
    report.push('\n');
    report
}

/// Write the report for `session` into the configured report directory.
///
/// Fails with `SubnetsNotInitialized` before touching the filesystem when no
/// subnets exist.
pub fn write_report<S: LogSink + ?Sized>(
    session: &Session,
    sink: &S,
    config: &Config,
) -> Result<PathBuf> {
    log::info!("#Start write_report()");
    let summary = session.summary()?;
    let records = sink.tail(config.report_tail)?;

    if !config.report_dir.exists() {
        log::info!("Creating report dir: {}", config.report_dir.display());
        std::fs::create_dir_all(&config.report_dir)?;
    }
    let path = config.report_file();
    std::fs::write(&path, render_report(&summary, &records))?;
    log::info!(
        "Report written to {} with {} traffic records",
        path.display(),
        records.len()
    );
    Ok(path)
}
