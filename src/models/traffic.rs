//! Traffic decisions and the log records they produce.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Timestamp layout used in log records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a traffic check.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Allowed,
    Blocked,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allowed => write!(f, "ALLOWED"),
            Decision::Blocked => write!(f, "BLOCKED"),
        }
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Decision, String> {
        match s {
            "ALLOWED" => Ok(Decision::Allowed),
            "BLOCKED" => Ok(Decision::Blocked),
            other => Err(format!("unknown decision '{other}'")),
        }
    }
}

/// One simulated traffic check. Immutable once created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrafficEvent {
    pub timestamp: NaiveDateTime,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub decision: Decision,
}

impl TrafficEvent {
    /// The single-line log record for this event.
    pub fn record(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TrafficEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | SRC={} -> DST={} | {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.source,
            self.destination,
            self.decision
        )
    }
}

lazy_static! {
    static ref RECORD_RE: Regex = Regex::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) \| SRC=(\S+) -> DST=(\S+) \| (ALLOWED|BLOCKED)$"
    )
    .expect("Invalid Regex?");
}

impl FromStr for TrafficEvent {
    type Err = String;

    /// Parse a record previously written by [`TrafficEvent::record`].
    fn from_str(line: &str) -> Result<TrafficEvent, String> {
        let line = line.trim_end();
        let caps = RECORD_RE
            .captures(line)
            .ok_or_else(|| format!("not a traffic record: '{line}'"))?;
        let timestamp = NaiveDateTime::parse_from_str(&caps[1], TIMESTAMP_FORMAT)
            .map_err(|e| format!("bad timestamp '{}': {e}", &caps[1]))?;
        let source = caps[2]
            .parse()
            .map_err(|_| format!("bad source '{}'", &caps[2]))?;
        let destination = caps[3]
            .parse()
            .map_err(|_| format!("bad destination '{}'", &caps[3]))?;
        let decision = caps[4].parse()?;
        Ok(TrafficEvent {
            timestamp,
            source,
            destination,
            decision,
        })
    }
}
