//! Guest isolation rule and traffic check logging.
//!
//! Only one rule exists: traffic from the guest subnet to the internal
//! subnet is blocked, everything else is allowed.

use crate::config::Timezone;
use crate::error::{AddressField, GuardError, Result};
use crate::models::{Decision, SubnetPair, TrafficEvent};
use crate::output::LogSink;
use std::net::Ipv4Addr;

/// Apply the guest isolation rule. No side effects.
pub fn decide(subnets: &SubnetPair, source: Ipv4Addr, destination: Ipv4Addr) -> Decision {
    if subnets.guest.contains(source) && subnets.internal.contains(destination) {
        Decision::Blocked
    } else {
        Decision::Allowed
    }
}

fn parse_address(value: &str, field: AddressField) -> Result<Ipv4Addr> {
    value
        .trim()
        .parse()
        .map_err(|_| GuardError::InvalidAddress {
            field,
            value: value.to_string(),
        })
}

/// Evaluates traffic checks and appends one record per successful check.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessController {
    timezone: Timezone,
}

impl AccessController {
    pub fn new(timezone: Timezone) -> AccessController {
        AccessController { timezone }
    }

    /// Check `source -> destination` against `subnets` and log the decision.
    ///
    /// All input is validated before anything is written to `sink`.
    pub fn evaluate<S: LogSink + ?Sized>(
        &self,
        subnets: Option<&SubnetPair>,
        source: &str,
        destination: &str,
        sink: &mut S,
    ) -> Result<TrafficEvent> {
        let subnets = subnets.ok_or(GuardError::SubnetsNotInitialized)?;
        let source = parse_address(source, AddressField::Source)?;
        let destination = parse_address(destination, AddressField::Destination)?;

        let event = TrafficEvent {
            timestamp: self.timezone.now(),
            source,
            destination,
            decision: decide(subnets, source, destination),
        };
        log::debug!(
            "Traffic {source} ({:?}) -> {destination} ({:?}) = {}",
            subnets.zone_of(source),
            subnets.zone_of(destination),
            event.decision
        );

        sink.append(&event.record())?;
        Ok(event)
    }
}

/// [`AccessController::evaluate`] timestamped in local time.
pub fn evaluate<S: LogSink + ?Sized>(
    subnets: Option<&SubnetPair>,
    source: &str,
    destination: &str,
    sink: &mut S,
) -> Result<TrafficEvent> {
    AccessController::default().evaluate(subnets, source, destination, sink)
}
