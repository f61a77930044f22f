//! Caller-owned subnet state.
//!
//! A [`Session`] starts `Uninitialized` and becomes `Ready` after the first
//! successful split. Later splits replace the pair; a failed split leaves the
//! previous state as it was.

use super::access::AccessController;
use super::planner::{describe, split};
use crate::config::{Timezone, MAX_SELECTABLE_PREFIX, MIN_SELECTABLE_PREFIX};
use crate::error::{GuardError, Result};
use crate::models::{NetworkSpec, SubnetDetails, SubnetPair, TrafficEvent};
use crate::output::LogSink;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "state", content = "subnets")]
pub enum SessionState {
    #[default]
    Uninitialized,
    Ready(SubnetPair),
}

/// Display values for both halves of the current split.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetSummary {
    pub parent: NetworkSpec,
    pub internal: SubnetDetails,
    pub guest: SubnetDetails,
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    controller: AccessController,
}

impl Session {
    pub fn new(timezone: Timezone) -> Session {
        Session {
            state: SessionState::Uninitialized,
            controller: AccessController::new(timezone),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn subnets(&self) -> Option<&SubnetPair> {
        match &self.state {
            SessionState::Uninitialized => None,
            SessionState::Ready(pair) => Some(pair),
        }
    }

    /// Split the network given by the form's address and prefix fields.
    ///
    /// The prefix must be within the selectable range (/8 to /30).
    pub fn generate(&mut self, address: &str, prefix: &str) -> Result<SubnetPair> {
        let base = NetworkSpec::from_parts(address, prefix)?;
        self.generate_from(base)
    }

    /// Same as [`Session::generate`] for a single `address/prefix` string.
    pub fn generate_cidr(&mut self, cidr: &str) -> Result<SubnetPair> {
        let base: NetworkSpec = cidr.parse()?;
        self.generate_from(base)
    }

    fn generate_from(&mut self, base: NetworkSpec) -> Result<SubnetPair> {
        let len = base.prefix_len();
        if !(MIN_SELECTABLE_PREFIX..=MAX_SELECTABLE_PREFIX).contains(&len) {
            return Err(GuardError::InvalidNetwork(format!(
                "prefix /{len} is outside /{MIN_SELECTABLE_PREFIX}-/{MAX_SELECTABLE_PREFIX}"
            )));
        }
        let pair = split(base)?;
        if let SessionState::Ready(previous) = self.state {
            log::info!("Replacing subnets {previous} with {pair}");
        }
        self.state = SessionState::Ready(pair);
        Ok(pair)
    }

    /// Evaluate a traffic check against the current subnets.
    pub fn check<S: LogSink + ?Sized>(
        &self,
        source: &str,
        destination: &str,
        sink: &mut S,
    ) -> Result<TrafficEvent> {
        self.controller
            .evaluate(self.subnets(), source, destination, sink)
    }

    /// Display values for the current subnets.
    pub fn summary(&self) -> Result<SubnetSummary> {
        let pair = self.subnets().ok_or(GuardError::SubnetsNotInitialized)?;
        Ok(SubnetSummary {
            parent: pair.parent,
            internal: describe(pair.internal)?,
            guest: describe(pair.guest)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Decision;
    use crate::output::MemoryLogSink;

    #[test]
    fn test_uninitialized_to_ready() {
        let mut session = Session::default();
        assert_eq!(session.state(), &SessionState::Uninitialized);
        assert!(matches!(
            session.summary(),
            Err(GuardError::SubnetsNotInitialized)
        ));

        let pair = session.generate("192.168.1.0", "24").unwrap();
        assert_eq!(pair.internal.to_string(), "192.168.1.0/25");
        assert_eq!(session.state(), &SessionState::Ready(pair));
    }

    #[test]
    fn test_regenerate_replaces_pair() {
        let mut session = Session::default();
        session.generate("192.168.1.0", "24").unwrap();
        session.generate_cidr("10.0.0.0/8").unwrap();
        let pair = session.subnets().unwrap();
        assert_eq!(pair.internal.to_string(), "10.0.0.0/9");
        assert_eq!(pair.guest.to_string(), "10.128.0.0/9");
    }

    #[test]
    fn test_failed_generate_keeps_state() {
        let mut session = Session::default();
        session.generate("192.168.1.0", "24").unwrap();
        let before = *session.state();

        assert!(session.generate("999.1.1.1", "24").is_err());
        assert!(session.generate("10.0.0.0", "31").is_err());
        assert!(session.generate("10.0.0.0", "").is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_selectable_prefix_range() {
        let mut session = Session::default();
        assert!(matches!(
            session.generate("10.0.0.0", "7"),
            Err(GuardError::InvalidNetwork(_))
        ));
        assert!(session.generate("10.0.0.0", "8").is_ok());
        assert!(session.generate("10.0.0.0", "30").is_ok());
        assert!(matches!(
            session.generate("10.0.0.0", "31"),
            Err(GuardError::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_check_requires_ready() {
        let mut sink = MemoryLogSink::new();
        let mut session = Session::default();
        assert!(matches!(
            session.check("192.168.1.200", "192.168.1.50", &mut sink),
            Err(GuardError::SubnetsNotInitialized)
        ));
        assert!(sink.records().is_empty());

        session.generate("192.168.1.0", "24").unwrap();
        let event = session
            .check("192.168.1.200", "192.168.1.50", &mut sink)
            .unwrap();
        assert_eq!(event.decision, Decision::Blocked);
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_summary_and_json() {
        let mut session = Session::default();
        session.generate("192.168.1.5", "24").unwrap();
        let summary = session.summary().unwrap();
        assert_eq!(summary.parent.to_string(), "192.168.1.0/24");
        assert_eq!(summary.internal.hosts.to_string(), "192.168.1.1 - 192.168.1.126");
        assert_eq!(summary.guest.hosts.to_string(), "192.168.1.129 - 192.168.1.254");

        let json = serde_json::to_value(session.state()).unwrap();
        assert_eq!(json["state"], "Ready");
        assert_eq!(json["subnets"]["guest"], "192.168.1.128/25");
    }
}
