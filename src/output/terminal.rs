//! Terminal output utilities.
//!
//! Provides formatting helpers for the interactive adapter.

use crate::models::{Decision, SubnetDetails, TrafficEvent};
use crate::processing::SubnetSummary;
use colored::Colorize;

/// Format a value as a right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    if value_str.len() >= width {
        value_str
    } else {
        format!("{value_str:>width$}")
    }
}

fn subnet_block(title: &str, d: &SubnetDetails) -> String {
    format!(
        "{title} {block}\n  Network   : {network}\n  Broadcast : {broadcast}\n  Netmask   : {netmask}\n  Host range: {hosts} ({count} hosts)",
        title = title.bold(),
        block = d.block,
        network = format_field(d.network, 15),
        broadcast = format_field(d.broadcast, 15),
        netmask = format_field(d.netmask, 15),
        hosts = d.hosts,
        count = d.hosts.count(),
    )
}

/// Multi-line summary of both subnets.
pub fn format_summary(summary: &SubnetSummary) -> String {
    format!(
        "Subnets generated for {}\n{}\n{}",
        summary.parent,
        subnet_block("Internal", &summary.internal),
        subnet_block("Guest   ", &summary.guest),
    )
}

/// Coloured one-line result of a traffic check.
pub fn format_decision(event: &TrafficEvent) -> String {
    let status = match event.decision {
        Decision::Blocked => format!("{} - Guest to Internal", event.decision).red().bold(),
        Decision::Allowed => format!("{} - Traffic permitted", event.decision).green().bold(),
    };
    format!("{} -> {} : {status}", event.source, event.destination)
}
