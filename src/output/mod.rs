//! Output of traffic records and reports.
//!
//! This module handles everything written outside the core logic:
//! - [`log_sink`] - Append-only traffic record stores
//! - [`report`] - Plain-text security report
//! - [`terminal`] - Terminal output with colors

mod log_sink;
mod report;
mod terminal;

pub use log_sink::{FileLogSink, LogSink, MemoryLogSink};
pub use report::{render_report, write_report, REPORT_TITLE};
pub use terminal::{format_decision, format_field, format_summary};
